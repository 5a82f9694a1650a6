use std::sync::Arc;

use refresh_service_client::RefreshDispatcher;
use s3_client::ObjectStore;

use crate::config::Config;

#[derive(Clone)]
pub struct Context {
    pub s3_client: Arc<dyn ObjectStore>,
    pub dispatcher: Arc<dyn RefreshDispatcher>,
    pub config: Config,
}
