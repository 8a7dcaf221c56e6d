pub mod compute;
pub mod export_network;
pub mod export_user_nodes;
pub mod preprocess;
pub mod resolve_urls;
