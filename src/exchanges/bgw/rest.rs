use crate::core::errors::BgwError;
use crate::core::kernel::RestClient;
use crate::core::types::ApiResult;
use crate::exchanges::bgw::endpoints::MarketRequest;
use tracing::instrument;

/// Thin typed wrapper around `RestClient` for the Bitget Wallet market API
pub struct BgwRestClient<R: RestClient> {
    client: R,
}

impl<R: RestClient> BgwRestClient<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    /// Resolve the request's endpoint and body through the registry and send it
    #[instrument(skip(self, request), fields(operation = %request.operation()))]
    pub async fn execute(&self, request: &MarketRequest) -> Result<ApiResult, BgwError> {
        let body = request.body();
        self.client.post(request.path(), Some(&body)).await
    }
}
