pub mod tokio_host;
