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

use serde::de::{Deserialize, Deserializer};
use std::collections::BTreeMap as Map;
use std::fmt;

/// Status code the checker reports when its own check of a host succeeded.
pub const STATUS_OK: i64 = 200;

/// CNI health snapshot of a single host as reported by the health checker.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct HostStatus {
    #[serde(rename = "HostName")]
    pub hostname: String,
    /// Network address -> reachability (0 means unreachable).
    #[serde(rename = "Connectivity", deserialize_with = "null_as_default")]
    pub connectivity: Map<String, i64>,
    /// Number of allocatable network devices on the host.
    #[serde(rename = "Allocability")]
    pub allocability: i64,
    #[serde(rename = "StatusCode")]
    pub status_code: i64,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

/// Verdict derived from a `HostStatus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnosis {
    /// Allocability does not match the number of expected devices, so the
    /// connectivity values cannot be trusted.
    NotFunctional,
    /// No mismatch and no lost address, yet the host was flagged.
    HealthyButFlagged,
    PartialConnectivityLoss { unreachable: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSummary {
    pub allocatable: i64,
    pub connectable: usize,
    pub expected: usize,
}

impl fmt::Display for DeviceSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f,
                 "Allocatable network devices: {}/{}",
                 self.allocatable,
                 self.expected)?;
        write!(f,
               "Connectable network devices: {}/{}",
               self.connectable,
               self.expected)
    }
}

impl fmt::Display for HostStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.hostname, self.status_code)
    }
}

impl HostStatus {
    pub fn expected_devices(&self) -> usize {
        self.connectivity.len()
    }

    pub fn unreachable_addresses(&self) -> Vec<String> {
        self.connectivity
            .iter()
            .filter(|&(_, &value)| value == 0)
            .map(|(address, _)| address.clone())
            .collect()
    }

    pub fn allocability_matches(&self) -> bool {
        self.allocability == self.expected_devices() as i64
    }

    pub fn diagnose(&self) -> Diagnosis {
        if !self.allocability_matches() {
            debug!("allocability mismatch on {}: {} != {}",
                   self.hostname,
                   self.allocability,
                   self.expected_devices());
            return Diagnosis::NotFunctional;
        }

        let unreachable = self.unreachable_addresses();
        if unreachable.is_empty() {
            Diagnosis::HealthyButFlagged
        } else {
            Diagnosis::PartialConnectivityLoss { unreachable: unreachable }
        }
    }

    pub fn device_summary(&self) -> DeviceSummary {
        let expected = self.expected_devices();

        DeviceSummary {
            allocatable: self.allocability,
            connectable: expected - self.unreachable_addresses().len(),
            expected: expected,
        }
    }

    pub fn is_check_ok(&self) -> bool {
        self.status_code == STATUS_OK
    }

    /// One line describing what is wrong with the host.
    pub fn render_diagnosis(&self) -> String {
        let line = match self.diagnose() {
            Diagnosis::NotFunctional => {
                format!("Host {} is not functional or unable to check the status: {} ({})",
                        self.hostname,
                        self.message,
                        self.status_code)
            }
            Diagnosis::HealthyButFlagged => {
                format!("Host {} seems healthy. {}", self.hostname, self.message)
            }
            Diagnosis::PartialConnectivityLoss { unreachable } => {
                format!("Host {} lost connection(s) on network address(es): [{}]. {}",
                        self.hostname,
                        unreachable.join(", "),
                        self.message)
            }
        };

        line.trim_end().to_string()
    }
}

/// The checker serializes empty maps and lists as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where D: Deserializer<'de>,
          T: Default + Deserialize<'de>
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
