use crate::catalog::{Company, Group};
use crate::data::{ChartStyle, Period};
use crate::dashboard::Controls;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub group: Option<Group>,
    pub period: Option<Period>,
    pub chart: Option<ChartStyle>,
    /// Symbols given with `--select`, upper-cased
    pub select: Option<Vec<String>>,
    pub print: bool,
}

impl Args {
    /// Initial control values; unknown `--select` symbols are rejected
    pub fn controls(&self) -> Result<Controls, ParseError> {
        let mut controls = Controls::new(self.group.unwrap_or_default());
        if let Some(period) = self.period {
            controls.period = period;
        }
        if let Some(chart) = self.chart {
            controls.chart = chart;
        }
        if let Some(symbols) = &self.select {
            let group = controls.group;
            let mut selected: Vec<Company> = Vec::with_capacity(symbols.len());
            for symbol in symbols {
                let company = group.find_symbol(symbol).ok_or_else(|| {
                    usage_error(&format!("{symbol} is not listed in the selected group"))
                })?;
                if !selected.contains(&company) {
                    selected.push(company);
                }
            }
            controls.selected = selected;
        }
        Ok(controls)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: i32,
    pub message: String,
}

fn usage_error(message: &str) -> ParseError {
    ParseError {
        code: 2,
        message: format!("{message}\n\n{}", help_text(env!("CARGO_PKG_NAME"))),
    }
}

#[must_use]
pub fn help_text(bin_name: &str) -> String {
    indoc::formatdoc! {
        "
        Stock dashboard

        Usage:
          {bin_name} [options]

        Options:
          -h, --help                 Show this help
          -V, --version              Show version
              --group <top|ai>       Company group (default: top)
              --period <1y|2y|3y|5y> Lookback window (default: 3y)
              --chart <line|candle>  Price chart style (default: line)
              --select <TICKER,...>  Initially selected companies
              --print                Print a plain-text report and exit
        ",
        bin_name = bin_name,
    }
}

#[must_use]
pub fn version_text() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

pub fn parse_args<I, S>(args: I) -> Result<Command, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut parsed = Args::default();
    let mut show_help = false;
    let mut show_version = false;

    let mut args = args.into_iter().map(Into::into);
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| usage_error(&format!("{name} needs a value")))
        };

        match flag.as_str() {
            "-h" | "--help" => show_help = true,
            "-V" | "--version" => show_version = true,
            "--print" => parsed.print = true,
            "--group" => {
                let raw = value("--group")?;
                parsed.group = Some(
                    Group::parse(&raw)
                        .ok_or_else(|| usage_error(&format!("unknown group: {raw}")))?,
                );
            }
            "--period" => {
                let raw = value("--period")?;
                parsed.period = Some(
                    Period::parse(&raw)
                        .ok_or_else(|| usage_error(&format!("unknown period: {raw}")))?,
                );
            }
            "--chart" => {
                let raw = value("--chart")?;
                parsed.chart = Some(
                    ChartStyle::parse(&raw)
                        .ok_or_else(|| usage_error(&format!("unknown chart style: {raw}")))?,
                );
            }
            "--select" => {
                let raw = value("--select")?;
                parsed.select = Some(
                    raw.split(',')
                        .map(|s| s.trim().to_ascii_uppercase())
                        .filter(|s| !s.is_empty())
                        .collect(),
                );
            }
            _ if arg.starts_with('-') => {
                return Err(usage_error(&format!("unknown option: {arg}")));
            }
            _ => {
                return Err(usage_error(&format!("unexpected argument: {arg}")));
            }
        }
    }

    if show_help {
        return Ok(Command::Help);
    }

    if show_version {
        return Ok(Command::Version);
    }

    Ok(Command::Run(parsed))
}
