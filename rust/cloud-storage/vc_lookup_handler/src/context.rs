use std::sync::Arc;

use s3_client::ObjectStore;

use crate::config::Config;

#[derive(Clone)]
pub struct Context {
    pub s3_client: Arc<dyn ObjectStore>,
    pub config: Config,
}
