//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::client::ClientPage;
use crate::domain::types::Theme;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientListQuery, ClientReader, ThemeStore};

mock! {
    pub Repository {}

    #[async_trait]
    impl ClientReader for Repository {
        async fn fetch_clients(&self, query: &ClientListQuery) -> RepositoryResult<ClientPage>;
    }

    impl ThemeStore for Repository {
        fn load_theme(&self) -> RepositoryResult<Option<Theme>>;
        fn save_theme(&self, theme: Theme) -> RepositoryResult<()>;
    }
}
