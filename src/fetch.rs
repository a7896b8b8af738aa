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

use crate::config::Config;
use crate::error::{Error, Result};
use crate::report::Report;
use reqwest::blocking::Client;
use std::fs;
use std::path::PathBuf;

/// Raw answer of a status source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Something that can hand out a status payload, optionally for one host.
pub trait Source {
    fn fetch(&self, host: Option<&str>) -> Result<Response>;

    /// Human readable origin of the payload for diagnostics.
    fn describe(&self) -> String;
}

pub struct HttpSource {
    endpoint: String,
    client: Client,
}

impl HttpSource {
    pub fn new(config: &Config) -> Result<HttpSource> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| {
                Error::Request {
                    url: config.endpoint.clone(),
                    source: err,
                }
            })?;

        Ok(HttpSource {
            endpoint: config.endpoint.clone(),
            client: client,
        })
    }
}

impl Source for HttpSource {
    fn fetch(&self, host: Option<&str>) -> Result<Response> {
        let mut request = self.client.get(self.endpoint.as_str());
        if let Some(host) = host {
            request = request.query(&[("host", host)]);
        }

        debug!("requesting {} (host: {:?})", self.endpoint, host);

        let to_error = |err: reqwest::Error| {
            Error::Request {
                url: self.endpoint.clone(),
                source: err,
            }
        };

        let response = request.send().map_err(&to_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(&to_error)?;

        debug!("status: {}, body length: {}", status, body.len());

        Ok(Response {
            status: status,
            body: body,
        })
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Payload saved to disk earlier, e.g. with `curl`.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> FileSource {
        FileSource { path: path.into() }
    }
}

impl Source for FileSource {
    fn fetch(&self, host: Option<&str>) -> Result<Response> {
        if let Some(host) = host {
            warn!("{:?} is a saved payload, host {} can not be selected from it",
                  self.path,
                  host);
        }

        let body = fs::read_to_string(&self.path).map_err(|err| {
                Error::Io {
                    path: self.path.clone(),
                    source: err,
                }
            })?;

        Ok(Response {
            status: 200,
            body: body,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches and decodes one report.
///
/// A non-success status is a transport error, except for the aggregate
/// endpoint: the checker answers with a failure status when it found failed
/// hosts, so a body that decodes as an aggregate report is accepted there.
pub fn fetch_report(source: &dyn Source, host: Option<&str>) -> Result<Report> {
    let response = source.fetch(host)?;

    if response.is_success() {
        let report = Report::from_slice(response.body.as_bytes())?;
        return match (host, report) {
            (Some(host), Report::Aggregate(_)) => {
                Err(Error::ShapeMismatch {
                    host: host.to_string(),
                    payload: response.body,
                })
            }
            (_, report) => Ok(report),
        };
    }

    if host.is_none() {
        if let Ok(report @ Report::Aggregate(_)) = Report::from_slice(response.body.as_bytes()) {
            info!("checker answered {} with a failure report", response.status);
            return Ok(report);
        }
    }

    Err(Error::Transport {
        url: source.describe(),
        status: response.status,
        body: response.body,
    })
}
