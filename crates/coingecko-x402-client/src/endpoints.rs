//! The CoinGecko x402 endpoints exercised by the CLI.

/// Root of the pay-per-use CoinGecko API.
pub const BASE_URL: &str = "https://pro-api.coingecko.com/api/v3/x402";

/// Join `endpoint` onto `base` and append `params` as a form-urlencoded
/// query, keeping their order.
pub fn build_url(base: &str, endpoint: &str, params: &[(&str, &str)]) -> String {
    let url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    if params.is_empty() {
        return url;
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{url}?{query}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    TokenPrice,
    SearchPools,
    TrendingPools,
    TokenData,
    SimplePrice,
}

impl Endpoint {
    /// Run order of the full suite.
    pub const ALL: [Endpoint; 5] = [
        Endpoint::TokenPrice,
        Endpoint::SearchPools,
        Endpoint::TrendingPools,
        Endpoint::TokenData,
        Endpoint::SimplePrice,
    ];

    /// Name accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Endpoint::TokenPrice => "token_price",
            Endpoint::SearchPools => "search_pools",
            Endpoint::TrendingPools => "trending_pools",
            Endpoint::TokenData => "token_data",
            Endpoint::SimplePrice => "simple_price",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Endpoint::TokenPrice => "Simple Token Price (WETH on ETH)",
            Endpoint::SearchPools => "Search Pools (Solana)",
            Endpoint::TrendingPools => "Trending Pools (Base)",
            Endpoint::TokenData => "Token Data (USDT on ETH)",
            Endpoint::SimplePrice => "Simple Price (BTC, ETH, SOL)",
        }
    }

    /// One-line description for `--help`.
    pub fn description(self) -> &'static str {
        match self {
            Endpoint::TokenPrice => "Get WETH price on Ethereum",
            Endpoint::SearchPools => "Search pools on Solana",
            Endpoint::TrendingPools => "Get trending pools on Base",
            Endpoint::TokenData => "Get USDT data on Ethereum",
            Endpoint::SimplePrice => "Get BTC, ETH, SOL prices",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::TokenPrice => {
                "onchain/simple/networks/eth/token_price/0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
            }
            Endpoint::SearchPools => "onchain/search/pools",
            Endpoint::TrendingPools => "onchain/networks/base/trending_pools",
            Endpoint::TokenData => {
                "onchain/networks/eth/tokens/0xdac17f958d2ee523a2206206994597c13d831ec7"
            }
            Endpoint::SimplePrice => "simple/price",
        }
    }

    pub fn params(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Endpoint::TokenPrice => &[
                ("include_market_cap", "true"),
                ("include_24hr_vol", "true"),
                ("include_24hr_price_change", "true"),
            ],
            Endpoint::SearchPools => &[
                ("query", "pump"),
                ("network", "solana"),
                ("include", "base_token,quote_token,dex"),
                ("page", "1"),
            ],
            Endpoint::TrendingPools => &[
                ("page", "1"),
                ("duration", "5m"),
                ("include", "base_token,quote_token,dex"),
            ],
            Endpoint::TokenData => &[("include", "top_pools"), ("include_composition", "true")],
            Endpoint::SimplePrice => &[
                ("vs_currencies", "usd"),
                ("ids", "bitcoin,ethereum,solana"),
                ("include_market_cap", "true"),
                ("include_24hr_vol", "true"),
                ("include_24hr_change", "true"),
                ("include_last_updated_at", "true"),
                ("precision", "full"),
            ],
        }
    }

    pub fn url(self, base: &str) -> String {
        build_url(base, self.path(), self.params())
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.key() == key)
    }

    /// Comma-separated list of all keys, in run order.
    pub fn available_keys() -> String {
        Self::ALL.map(Endpoint::key).join(", ")
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_without_params_has_no_query() {
        assert_eq!(
            build_url(BASE_URL, "simple/price", &[]),
            "https://pro-api.coingecko.com/api/v3/x402/simple/price"
        );
    }

    #[test]
    fn build_url_normalizes_slashes() {
        assert_eq!(
            build_url("http://localhost:8080/", "/a/b", &[("x", "1")]),
            "http://localhost:8080/a/b?x=1"
        );
    }

    #[test]
    fn build_url_encodes_params_in_order() {
        let url = build_url(
            BASE_URL,
            "onchain/search/pools",
            &[("query", "pump it"), ("include", "base_token,dex")],
        );
        assert_eq!(
            url,
            "https://pro-api.coingecko.com/api/v3/x402/onchain/search/pools\
             ?query=pump+it&include=base_token%2Cdex"
        );
    }

    #[test]
    fn simple_price_url() {
        assert_eq!(
            Endpoint::SimplePrice.url(BASE_URL),
            "https://pro-api.coingecko.com/api/v3/x402/simple/price\
             ?vs_currencies=usd&ids=bitcoin%2Cethereum%2Csolana&include_market_cap=true\
             &include_24hr_vol=true&include_24hr_change=true&include_last_updated_at=true\
             &precision=full"
        );
    }

    #[test]
    fn trending_pools_url() {
        assert_eq!(
            Endpoint::TrendingPools.url(BASE_URL),
            "https://pro-api.coingecko.com/api/v3/x402/onchain/networks/base/trending_pools\
             ?page=1&duration=5m&include=base_token%2Cquote_token%2Cdex"
        );
    }

    #[test]
    fn keys_roundtrip_and_are_unique() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_key(endpoint.key()), Some(endpoint));
        }
        assert_eq!(Endpoint::from_key("nope"), None);
        assert_eq!(
            Endpoint::available_keys(),
            "token_price, search_pools, trending_pools, token_data, simple_price"
        );
    }
}
