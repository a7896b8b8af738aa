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

use crate::error::Result;
use regex::Regex;

/// Selects hosts of an aggregate report by hostname.
#[derive(Debug, Clone)]
pub struct HostFilter {
    pattern: Regex,
    inverse: bool,
}

impl HostFilter {
    pub fn new(pattern: &str, inverse: bool) -> Result<HostFilter> {
        let pattern = Regex::new(pattern)?;
        debug!("host filter: {} (inverse: {})", pattern, inverse);

        Ok(HostFilter {
            pattern: pattern,
            inverse: inverse,
        })
    }

    pub fn matches(&self, hostname: &str) -> bool {
        self.pattern.is_match(hostname) != self.inverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn wildcard_matches_everything() {
        let filter = HostFilter::new(".*", false).unwrap();

        assert!(filter.matches("node1"));
        assert!(filter.matches(""));
    }

    #[test]
    fn inverse_flips_the_match() {
        let filter = HostFilter::new("^worker-", false).unwrap();
        assert!(filter.matches("worker-1"));
        assert!(!filter.matches("master-0"));

        let filter = HostFilter::new("^worker-", true).unwrap();
        assert!(!filter.matches("worker-1"));
        assert!(filter.matches("master-0"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        match HostFilter::new("node[", false) {
            Err(Error::Filter(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}
