// MIT License
//
// Copyright (c) 2016 Alexander Thaller <alexander.thaller@trivago.com>
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

pub const ENDPOINT_ENV: &'static str = "MULTI_NIC_HEALTH_CHECKER_ENDPOINT";
pub const URL_ENV: &'static str = "CHECKER_URL";
pub const NAMESPACE_ENV: &'static str = "CHECKER_NAMESPACE";
pub const TIMEOUT_ENV: &'static str = "MULTI_NIC_HEALTH_CHECKER_TIMEOUT";

pub const DEFAULT_NAMESPACE: &'static str = "multi-nic-cni-operator";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const SERVICE_NAME: &'static str = "multi-nic-cni-health-check";
const SERVICE_PORT: u16 = 8080;
const SERVICE_PATH: &'static str = "/status";

/// Where and how long to ask the health checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            endpoint: service_endpoint(DEFAULT_NAMESPACE),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration from a variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
        where F: Fn(&str) -> Option<String>
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let endpoint = match (lookup(ENDPOINT_ENV), lookup(URL_ENV)) {
            (Some(endpoint), _) => endpoint,
            (None, Some(url)) => url,
            (None, None) => {
                let namespace = lookup(NAMESPACE_ENV)
                    .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
                service_endpoint(&namespace)
            }
        };

        let timeout = match lookup(TIMEOUT_ENV) {
            Some(value) => parse_timeout(&value)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        debug!("endpoint: {}, timeout: {:?}", endpoint, timeout);

        Ok(Config {
            endpoint: endpoint,
            timeout: timeout,
        })
    }

    pub fn with_endpoint(mut self, endpoint: Option<&str>) -> Config {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint.to_string();
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Option<&str>) -> Result<Config> {
        if let Some(timeout) = timeout {
            self.timeout = parse_timeout(timeout)?;
        }
        Ok(self)
    }
}

/// In-cluster address of the checker service.
pub fn service_endpoint(namespace: &str) -> String {
    format!("http://{}.{}.svc:{}{}",
            SERVICE_NAME,
            namespace,
            SERVICE_PORT,
            SERVICE_PATH)
}

/// Parses a whole number of seconds given on the command line or environment.
pub fn parse_seconds(name: &str, value: &str) -> Result<u64> {
    value.trim()
        .parse::<u64>()
        .map_err(|err| Error::Config(format!("{} {:?} is not a number of seconds: {}", name, value, err)))
}

fn parse_timeout(value: &str) -> Result<Duration> {
    match parse_seconds("timeout", value)? {
        0 => Err(Error::Config("timeout must be at least one second".to_string())),
        secs => Ok(Duration::from_secs(secs)),
    }
}
