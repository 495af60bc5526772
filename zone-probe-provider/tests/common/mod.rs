//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use zone_probe_provider::{CloudflareAuth, ProviderCredentials, ZoneProvider, create_provider};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试 zone 名称（位于 `TEST_BASE_DOMAIN` 之下）
pub fn generate_test_zone_name(base: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("zp-test-{}.{base}", &uuid.to_string()[..8])
}

/// 测试上下文
pub struct TestContext {
    pub provider: Arc<dyn ZoneProvider>,
    pub account_id: String,
    pub base_domain: String,
}

impl TestContext {
    /// 创建 Cloudflare 测试上下文
    ///
    /// 优先使用 `CF_API_TOKEN`，否则使用 `CF_API_EMAIL` + `CF_API_KEY`
    pub fn cloudflare() -> Option<Self> {
        let account_id = env::var("CF_ACCOUNT_ID").ok()?;
        let base_domain = env::var("TEST_BASE_DOMAIN").ok()?;

        let auth = if let Ok(token) = env::var("CF_API_TOKEN") {
            CloudflareAuth::ApiToken { token }
        } else {
            CloudflareAuth::ApiKey {
                email: env::var("CF_API_EMAIL").ok()?,
                api_key: env::var("CF_API_KEY").ok()?,
            }
        };

        let credentials = ProviderCredentials::Cloudflare {
            auth,
            account_id: account_id.clone(),
        };
        let provider = create_provider(credentials).ok()?;

        Some(Self {
            provider,
            account_id,
            base_domain,
        })
    }
}
