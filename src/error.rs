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

use std::io;
use std::path::PathBuf;
use std::result;
use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed with status code {status}")]
    Transport {
        url: String,
        status: u16,
        body: String,
    },

    #[error("cannot request status from {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to process response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        payload: String,
    },

    #[error("failed to process response: no data received")]
    EmptyPayload,

    #[error("failed to process response: neither an aggregate nor a single host report")]
    UnknownShape { payload: String },

    #[error("asked for host {host} but received an aggregate report")]
    ShapeMismatch { host: String, payload: String },

    #[error("can not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid host filter: {0}")]
    Filter(#[from] regex::Error),
}

impl Error {
    /// Raw response body behind the error, if there is one to show.
    pub fn payload(&self) -> Option<&str> {
        match *self {
            Error::Transport { ref body, .. } => Some(body.as_str()),
            Error::Decode { ref payload, .. } |
            Error::UnknownShape { ref payload } |
            Error::ShapeMismatch { ref payload, .. } => Some(payload.as_str()),
            _ => None,
        }
    }
}
