//! Retrieval of the raw snapshot document.

use curl::easy::Easy;
use log::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};

/// Anything able to hand over the body of the rate document.
pub trait RateSource {
    fn fetch(&self) -> Result<Vec<u8>>;
}

/// Downloads the document over HTTP(S) with libcurl.
#[derive(Clone, Debug)]
pub struct HttpSource {
    config: Config,
}

impl HttpSource {
    pub fn new(config: Config) -> HttpSource {
        HttpSource { config }
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn transport(&self, source: curl::Error) -> Error {
        if source.is_write_error()
            || source.is_recv_error()
            || source.is_partial_file()
            || source.is_bad_content_encoding()
        {
            Error::ReadBody {
                url: self.config.url.clone(),
                message: source.to_string(),
            }
        } else {
            Error::Transport {
                url: self.config.url.clone(),
                source,
            }
        }
    }
}

impl RateSource for HttpSource {
    fn fetch(&self) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        let mut handle = Easy::new();

        handle.url(&self.config.url).map_err(|e| self.transport(e))?;
        handle.follow_location(true).map_err(|e| self.transport(e))?;
        handle
            .useragent(concat!("dolartoday/", env!("CARGO_PKG_VERSION")))
            .map_err(|e| self.transport(e))?;
        if let Some(timeout) = self.config.timeout {
            handle.timeout(timeout).map_err(|e| self.transport(e))?;
        }

        {
            let mut transfer = handle.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(|e| self.transport(e))?;
            transfer.perform().map_err(|e| self.transport(e))?;
        }

        match handle.response_code() {
            Ok(code) if code >= 400 => {
                warn!("{} answered with HTTP status {}", self.config.url, code)
            }
            Ok(code) => debug!("{} answered with HTTP status {}", self.config.url, code),
            Err(err) => debug!("no response code for {}: {}", self.config.url, err),
        }
        debug!("received {} bytes from {}", body.len(), self.config.url);

        Ok(body)
    }
}
