#![crate_name = "cnistatus"]
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

//! Reads the CNI health report of a multi-NIC cluster and explains which
//! hosts lost which networks.

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

extern crate chrono;
extern crate regex;
extern crate reqwest;
extern crate serde;
extern crate serde_json;
extern crate thiserror;

pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod host;
pub mod report;

pub use config::Config;
pub use error::{Error, Result};
pub use fetch::{fetch_report, FileSource, HttpSource, Response, Source};
pub use filter::HostFilter;
pub use host::{DeviceSummary, Diagnosis, HostStatus};
pub use report::{AggregateReport, Report, SingleHostReport};
