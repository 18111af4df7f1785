//! Run simulated requests through a sequential queue.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use log::{error, info};
use request_queue::{lagged, Config, SequentialQueue};
use tokio::time::sleep;
use {futures as _, tokio_util as _};

#[derive(Debug, Parser)]
#[command(about = "Run simulated requests one at a time, in submission order")]
struct Args {
    /// Requests as LABEL:MILLIS, with an optional ":fail" suffix.
    #[arg(index = 1, required = true)]
    requests: Vec<Request>,
    /// Name of the queue used in log messages.
    #[arg(long, default_value = "cli")]
    name: String,
    /// Give up on a request that runs longer than this.
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Delay every request by this amount before it starts.
    #[arg(long)]
    lag_ms: Option<u64>,
}

/// A simulated request.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Request {
    label: String,
    duration: Duration,
    fail: bool,
}

impl FromStr for Request {
    type Err = ParseRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let label = parts
            .next()
            .filter(|label| !label.is_empty())
            .ok_or(ParseRequestError::MissingLabel)?;
        let millis = parts.next().ok_or(ParseRequestError::MissingDuration)?;
        let duration = millis
            .parse()
            .map(Duration::from_millis)
            .map_err(|_| ParseRequestError::InvalidDuration(millis.into()))?;
        let fail = match parts.next() {
            None => false,
            Some("fail") => true,
            Some(other) => return Err(ParseRequestError::UnknownFlag(other.into())),
        };

        if parts.next().is_some() {
            return Err(ParseRequestError::TrailingInput);
        }

        Ok(Self {
            label: label.into(),
            duration,
            fail,
        })
    }
}

#[derive(Debug, Eq, PartialEq)]
enum ParseRequestError {
    MissingLabel,
    MissingDuration,
    InvalidDuration(String),
    UnknownFlag(String),
    TrailingInput,
}

impl Display for ParseRequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingLabel => write!(f, "Missing label."),
            Self::MissingDuration => write!(f, "Missing duration in milliseconds."),
            Self::InvalidDuration(millis) => write!(f, "Invalid duration: {millis}"),
            Self::UnknownFlag(flag) => write!(f, "Unknown flag: {flag}"),
            Self::TrailingInput => write!(f, "Unexpected input after flag."),
        }
    }
}

impl std::error::Error for ParseRequestError {}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config::new(args.name);

    if let Some(timeout) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(timeout));
    }

    let queue = SequentialQueue::with_config(config);
    let lag = args.lag_ms.map_or(Duration::ZERO, Duration::from_millis);
    let pending: Vec<_> = args
        .requests
        .into_iter()
        .map(|request| {
            let label = request.label.clone();
            let outcome = queue.submit(lagged(lag, move || simulate(request)));
            (label, outcome)
        })
        .collect();

    for (label, outcome) in pending {
        match outcome.await {
            Ok(elapsed) => info!("{label}: completed after {elapsed:?}"),
            Err(error) => error!("{label}: {error}"),
        }
    }
}

async fn simulate(request: Request) -> Result<Duration, String> {
    info!("{}: started", request.label);
    sleep(request.duration).await;

    if request.fail {
        Err(format!("simulated failure after {:?}", request.duration))
    } else {
        Ok(request.duration)
    }
}
