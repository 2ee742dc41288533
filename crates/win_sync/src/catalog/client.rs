use parking_lot::Once;
use reqwest::{Method, header};

// 一个对 reqwest::Client 的简单封装，用于访问目录与上传接口
#[derive(Clone)]
pub struct Client(reqwest::Client);

impl Client {
    pub fn new() -> Self {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            rustls::crypto::ring::default_provider()
                .install_default()
                .expect("Failed to install rustls crypto provider");
        });
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("win-sync/", env!("CARGO_PKG_VERSION"))),
        );
        Self(
            reqwest::Client::builder()
                .default_headers(headers)
                .gzip(true)
                .connect_timeout(std::time::Duration::from_secs(10))
                .read_timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("failed to build reqwest client"),
        )
    }

    // a wrapper of reqwest::Client::request to attach the store token when required
    pub fn request(&self, method: Method, url: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let mut req = self.0.request(method, url);
        // 变更类请求必须携带远端仓库的访问令牌，读取则是公开的
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, token);
        }
        req
    }

    pub fn inner_client(&self) -> &reqwest::Client {
        &self.0
    }
}

// clippy 建议实现 Default trait
impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
