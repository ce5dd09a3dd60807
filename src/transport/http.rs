//! HTTP device link using ureq
//!
//! One request per call, strictly sequential. No retry and no explicit
//! timeout beyond the transport defaults; transport and HTTP status errors
//! propagate to the caller, which decides whether they are fatal.

use super::DeviceLink;
use crate::config::CameraConfig;
use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::Path;

/// HTTP GET transport with Basic authentication
pub struct HttpLink {
    base_url: String,
    auth_header: String,
}

impl HttpLink {
    /// Create a link for the configured camera
    pub fn new(config: &CameraConfig) -> Self {
        let credentials = format!("{}:{}", config.username, config.password);
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {}", STANDARD.encode(credentials)),
        }
    }
}

impl DeviceLink for HttpLink {
    fn get(&mut self, path: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("HttpLink: GET {}", url);

        let mut response = ureq::get(&url)
            .header("Authorization", self.auth_header.as_str())
            .call()?;
        let body = response.body_mut().read_to_vec()?;
        Ok(body)
    }

    fn get_to_file(&mut self, path: &str, dst: &Path) -> Result<()> {
        let body = self.get(path)?;
        fs::write(dst, &body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let mut config = CameraConfig {
            base_url: "http://192.168.1.10:81/".to_string(),
            cgi_dir: "/cgi-bin".to_string(),
            pic_dir: "/snapshot".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            small_pic_name: "tmpfs".to_string(),
            full_pic_name: "snapshot".to_string(),
        };
        let link = HttpLink::new(&config);
        assert_eq!(link.base_url, "http://192.168.1.10:81");

        config.base_url = "http://192.168.1.10:81".to_string();
        let link = HttpLink::new(&config);
        assert_eq!(link.base_url, "http://192.168.1.10:81");
    }

    #[test]
    fn test_basic_auth_header() {
        let config = CameraConfig {
            base_url: "http://cam".to_string(),
            cgi_dir: "/cgi-bin".to_string(),
            pic_dir: "/snapshot".to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
            small_pic_name: "tmpfs".to_string(),
            full_pic_name: "snapshot".to_string(),
        };
        let link = HttpLink::new(&config);
        // base64("admin:secret")
        assert_eq!(link.auth_header, "Basic YWRtaW46c2VjcmV0");
    }
}
