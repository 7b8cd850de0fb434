// Interface adapters: session storage, wire protocol, and HTTP clients.

pub mod clients;
pub mod http;
pub mod notify;
pub mod protocol;
pub mod session;
