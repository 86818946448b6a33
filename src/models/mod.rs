pub mod lookup;
pub mod responses;
pub mod rpc;
