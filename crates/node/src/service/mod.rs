mod rpc;

pub use rpc::RpcService;
