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

extern crate chrono;
extern crate cnistatus;
extern crate loggerv;

#[macro_use]
extern crate log;

#[macro_use]
extern crate clap;

use chrono::{Duration, Utc};
use clap::{App, ArgMatches};
use cnistatus::config::parse_seconds;
use cnistatus::{fetch_report, Config, Error, FileSource, HostFilter, HttpSource, Report, Result, Source};
use log::Level;
use std::convert::TryFrom;
use std::process;

fn main() {
    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml)
        .version(crate_version!())
        .get_matches();

    let loglevel: Level = matches.value_of("log_level")
        .unwrap_or("warn")
        .parse()
        .unwrap_or(Level::Warn);
    if let Err(err) = loggerv::init_with_level(loglevel) {
        eprintln!("can not initialize logging: {}", err);
    }

    debug!("starting");
    debug!("matches: {:#?}", matches);

    match run(&matches) {
        Ok(out) => println!("{}", out),
        Err(err) => {
            eprintln!("{}", err);
            if let Some(payload) = err.payload() {
                eprintln!("{}", payload);
            }
            process::exit(1);
        }
    }
}

fn run(matches: &ArgMatches) -> Result<String> {
    let config = Config::from_env()?
        .with_endpoint(matches.value_of("endpoint"))
        .with_timeout(matches.value_of("timeout"))?;
    debug!("config: {:#?}", config);

    let max_age = parse_seconds("max age", matches.value_of("max_age").unwrap_or("300"))?;
    let max_age = i64::try_from(max_age)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| Error::Config(format!("max age {} is out of range", max_age)))?;

    let host = matches.value_of("host");
    let source: Box<dyn Source> = match matches.value_of("file") {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(&config)?),
    };

    let report = fetch_report(source.as_ref(), host)?;

    warn_report(&report, max_age);

    let report = match matches.value_of("filter_host") {
        Some(pattern) => {
            let filter = HostFilter::new(pattern, matches.is_present("filter_host_inverse"))?;
            report.filter(&filter)
        }
        None => report,
    };

    Ok(report.render())
}

fn warn_report(report: &Report, max_age: Duration) {
    match report.age(Utc::now()) {
        Some(age) if age > max_age => {
            warn!("report of {} is {} seconds old (checked at {})",
                  report.checker(),
                  age.num_seconds(),
                  report.check_time())
        }
        Some(_) => {}
        None => debug!("check time {:?} is not RFC 3339", report.check_time()),
    }

    for hostname in report.overlapping_hosts() {
        warn!("host {} is listed as healthy and failed", hostname)
    }

    if let Report::Aggregate(ref aggregate) = *report {
        for status in aggregate.flagged_but_healthy() {
            warn!("host {} is listed as failed but shows no problem", status)
        }
    }
}
