pub mod explorer_client;
