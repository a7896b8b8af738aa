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

extern crate cnistatus;
extern crate tempfile;

use cnistatus::{fetch_report, Diagnosis, Error, FileSource, HostFilter, Report};
use std::io::Write;
use tempfile::NamedTempFile;

fn saved_payload(data: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data.as_bytes()).unwrap();
    file
}

const FAILURES: &'static str = r#"{
    "HealthyHosts": ["worker-0", "worker-1"],
    "FailedInfo": [
        {
            "HostName": "worker-2",
            "Connectivity": {"192.168.0.0/18": 1, "192.168.64.0/18": 0},
            "Allocability": 2,
            "StatusCode": 200,
            "Status": "Success",
            "Message": ""
        },
        {
            "HostName": "worker-3",
            "Connectivity": null,
            "Allocability": 2,
            "StatusCode": 503,
            "Status": "Service Unavailable",
            "Message": "daemon not reachable"
        }
    ],
    "CheckTime": "2024-03-01T10:00:00.123456789Z",
    "Checker": "multi-nic-cni-health-checker-7d9f"
}"#;

#[test]
fn saved_aggregate_report_is_explained() {
    let file = saved_payload(FAILURES);
    let source = FileSource::new(file.path());

    let report = fetch_report(&source, None).unwrap();
    let out = report.render();

    assert!(out.starts_with("Found the following potential CNI failures at \
                             2024-03-01T10:00:00.123456789Z:"));
    assert!(out.contains("  Host worker-2 lost connection(s) on network address(es): \
                          [192.168.64.0/18]."));
    assert!(out.contains("  Host worker-3 is not functional or unable to check the status: \
                          daemon not reachable (503)"));
    assert!(out.ends_with("Healthy hosts: [worker-0, worker-1]"));
    assert!(report.checked_at().is_some());
}

#[test]
fn diagnosis_of_saved_report() {
    let file = saved_payload(FAILURES);
    let report = fetch_report(&FileSource::new(file.path()), None).unwrap();

    let aggregate = match report {
        Report::Aggregate(aggregate) => aggregate,
        other => panic!("unexpected report {:?}", other),
    };

    let verdicts: Vec<Diagnosis> = aggregate.failed_hosts.iter().map(|s| s.diagnose()).collect();
    assert_eq!(verdicts,
               vec![Diagnosis::PartialConnectivityLoss {
                        unreachable: vec!["192.168.64.0/18".to_string()],
                    },
                    Diagnosis::NotFunctional]);
}

#[test]
fn filtered_saved_report() {
    let file = saved_payload(FAILURES);
    let report = fetch_report(&FileSource::new(file.path()), None).unwrap();
    let filter = HostFilter::new("worker-[02]", false).unwrap();

    let out = report.filter(&filter).render();

    assert!(out.contains("worker-2"));
    assert!(!out.contains("worker-3"));
    assert!(out.ends_with("Healthy hosts: [worker-0]"));
}

#[test]
fn saved_single_host_report() {
    let file = saved_payload(r#"{
        "Info": {"HostName": "worker-0", "Connectivity": {"192.168.0.0/18": 1},
                 "Allocability": 1, "StatusCode": 200, "Status": "Success", "Message": ""},
        "CheckTime": "2024-03-01T10:00:00Z",
        "Checker": "checker-0"
    }"#);

    let out = fetch_report(&FileSource::new(file.path()), Some("worker-0")).unwrap().render();

    assert_eq!(out,
               "===== Health Status of worker-0 =====\nAllocatable network devices: \
                1/1\nConnectable network devices: 1/1\nHost is OK (all functional and \
                connected).\nReported by checker-0 at 2024-03-01T10:00:00Z");
}

#[test]
fn broken_payload_keeps_raw_text() {
    let file = saved_payload("<html>bad gateway</html>");

    let err = fetch_report(&FileSource::new(file.path()), None).unwrap_err();
    match err {
        Error::Decode { .. } => {}
        ref other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(err.payload(), Some("<html>bad gateway</html>"));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileSource::new(dir.path().join("status.json"));

    match fetch_report(&source, None) {
        Err(Error::Io { .. }) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn saved_aggregate_is_not_a_host_report() {
    let file = saved_payload(FAILURES);

    match fetch_report(&FileSource::new(file.path()), Some("worker-2")) {
        Err(Error::ShapeMismatch { host, payload }) => {
            assert_eq!(host, "worker-2");
            assert_eq!(payload, FAILURES);
        }
        other => panic!("unexpected result {:?}", other),
    }
}
