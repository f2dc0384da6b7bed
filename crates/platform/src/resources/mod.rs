//! Resources shipped with the panel.

mod post;

use std::sync::Arc;

pub use post::PostResource;

use crate::arbitrator::ResourceFactory;
use crate::resource::Resource;

fn posts() -> Arc<dyn Resource> {
    Arc::new(PostResource)
}

/// Factory knowing every built-in resource by identifier.
pub fn default_factory() -> ResourceFactory {
    ResourceFactory::new().with("posts", posts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_factory_resolves_posts() {
        let resource = default_factory().resolve("posts").unwrap();
        assert_eq!(resource.uri_key(), "posts");
        assert!(default_factory().resolve("comments").is_err());
    }
}
