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

use chrono::{DateTime, Duration, Utc};
use crate::error::{Error, Result};
use crate::filter::HostFilter;
use crate::host::{null_as_default, Diagnosis, HostStatus};
use serde_json::{self, Value};
use std::fmt::Display;

/// Answer of the checker's status endpoint when no host was requested.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AggregateReport {
    #[serde(rename = "HealthyHosts", deserialize_with = "null_as_default")]
    pub healthy_hosts: Vec<String>,
    #[serde(rename = "FailedInfo", deserialize_with = "null_as_default")]
    pub failed_hosts: Vec<HostStatus>,
    #[serde(rename = "CheckTime")]
    pub check_time: String,
    #[serde(rename = "Checker")]
    pub checker: String,
}

/// Answer of the checker's status endpoint for a single host.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SingleHostReport {
    #[serde(rename = "Info")]
    pub info: HostStatus,
    #[serde(rename = "CheckTime")]
    pub check_time: String,
    #[serde(rename = "Checker")]
    pub checker: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Aggregate(AggregateReport),
    SingleHost(SingleHostReport),
}

enum Shape {
    Aggregate,
    SingleHost,
}

impl AggregateReport {
    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.failed_hosts.is_empty() {
            out.push_str(format!("No CNI failures found at {}.\n", self.check_time).as_str());
        } else {
            out.push_str(format!("Found the following potential CNI failures at {}:\n",
                                 self.check_time)
                .as_str());
            for status in &self.failed_hosts {
                out.push_str(format!("  {}\n", status.render_diagnosis()).as_str());
            }
        }

        out.push_str(format!("Healthy hosts: {}", render_list(&self.healthy_hosts)).as_str());

        out
    }

    /// Hostnames listed as healthy and failed at the same time.
    pub fn overlapping_hosts(&self) -> Vec<String> {
        self.failed_hosts
            .iter()
            .filter(|status| self.healthy_hosts.contains(&status.hostname))
            .map(|status| status.hostname.clone())
            .collect()
    }

    /// Failed hosts without a detectable problem.
    pub fn flagged_but_healthy(&self) -> Vec<&HostStatus> {
        self.failed_hosts
            .iter()
            .filter(|status| status.diagnose() == Diagnosis::HealthyButFlagged)
            .collect()
    }

    fn retain(&mut self, filter: &HostFilter) {
        self.healthy_hosts.retain(|hostname| filter.matches(hostname));
        self.failed_hosts.retain(|status| filter.matches(&status.hostname));
    }
}

impl SingleHostReport {
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(format!("===== Health Status of {} =====\n", self.info.hostname).as_str());
        out.push_str(format!("{}\n", self.info.device_summary()).as_str());

        if !self.info.unreachable_addresses().is_empty() {
            out.push_str(format!("{}\n", self.info.render_diagnosis()).as_str());
        }

        if self.info.is_check_ok() {
            out.push_str("Host is OK (all functional and connected).\n");
        }

        out.push_str(format!("Reported by {} at {}", self.checker, self.check_time).as_str());

        out
    }
}

impl Report {
    /// Decodes a raw status payload, picking the variant from the fields present.
    pub fn from_slice(data: &[u8]) -> Result<Report> {
        let payload = String::from_utf8_lossy(data).into_owned();
        if payload.trim().is_empty() {
            return Err(Error::EmptyPayload);
        }

        let value: Value = match serde_json::from_str(&payload) {
            Ok(value) => value,
            Err(err) => {
                return Err(Error::Decode {
                    source: err,
                    payload: payload,
                })
            }
        };

        // Either list marks an aggregate; both are required to decode it.
        let shape = match value.as_object() {
            Some(map) if map.contains_key("HealthyHosts") || map.contains_key("FailedInfo") => {
                Shape::Aggregate
            }
            Some(map) if map.contains_key("Info") => Shape::SingleHost,
            _ => return Err(Error::UnknownShape { payload: payload }),
        };

        let report = match shape {
            Shape::Aggregate => serde_json::from_value(value).map(Report::Aggregate),
            Shape::SingleHost => serde_json::from_value(value).map(Report::SingleHost),
        };

        report.map_err(|err| {
            Error::Decode {
                source: err,
                payload: payload,
            }
        })
    }

    pub fn render(&self) -> String {
        match *self {
            Report::Aggregate(ref report) => report.render(),
            Report::SingleHost(ref report) => report.render(),
        }
    }

    pub fn check_time(&self) -> &str {
        match *self {
            Report::Aggregate(ref report) => &report.check_time,
            Report::SingleHost(ref report) => &report.check_time,
        }
    }

    pub fn checker(&self) -> &str {
        match *self {
            Report::Aggregate(ref report) => &report.checker,
            Report::SingleHost(ref report) => &report.checker,
        }
    }

    /// `CheckTime` as a timestamp, if the checker sent RFC 3339.
    pub fn checked_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.check_time())
            .ok()
            .map(|time| time.with_timezone(&Utc))
    }

    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.checked_at().map(|time| now.signed_duration_since(time))
    }

    pub fn overlapping_hosts(&self) -> Vec<String> {
        match *self {
            Report::Aggregate(ref report) => report.overlapping_hosts(),
            Report::SingleHost(_) => Vec::new(),
        }
    }

    /// Keeps only the hosts accepted by the filter. Single host reports are
    /// returned as they are.
    pub fn filter(self, filter: &HostFilter) -> Report {
        match self {
            Report::Aggregate(mut report) => {
                report.retain(filter);
                Report::Aggregate(report)
            }
            report => report,
        }
    }
}

fn render_list<A: Display>(list: &[A]) -> String {
    let items: Vec<String> = list.iter().map(|item| item.to_string()).collect();

    format!("[{}]", items.join(", "))
}
