//! Mapping of command-line tokens to reports.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use log::debug;

use crate::config::PROGRAM_NAME;
use crate::format::dotf;
use crate::snapshot::RateSnapshot;

/// A recognized command-line token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionToken {
    All,
    Help,
    DollarToday,
    DollarCucuta,
    DollarBitcoin,
    DollarDicom,
    DollarImplicit,
    EuroToday,
    EuroCucuta,
    EuroBitcoin,
    EuroDicom,
    EuroImplicit,
}

/// Token that is not part of [`OptionToken`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownToken(pub String);

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: no es un argumento valido", self.0)
    }
}

impl std::error::Error for UnknownToken {}

impl FromStr for OptionToken {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = match s {
            "all" => OptionToken::All,
            "help" => OptionToken::Help,
            "dtoday" => OptionToken::DollarToday,
            "dcucuta" => OptionToken::DollarCucuta,
            "dbitcoin" => OptionToken::DollarBitcoin,
            "ddicom" => OptionToken::DollarDicom,
            "dimpli" => OptionToken::DollarImplicit,
            "etoday" => OptionToken::EuroToday,
            "ecucuta" => OptionToken::EuroCucuta,
            "ebitcoin" => OptionToken::EuroBitcoin,
            "edicom" => OptionToken::EuroDicom,
            "eimpli" => OptionToken::EuroImplicit,
            _ => return Err(UnknownToken(s.to_string())),
        };
        Ok(token)
    }
}

impl OptionToken {
    /// Label and value for single-metric tokens, `None` for `all` and `help`.
    pub fn metric(self, snapshot: &RateSnapshot) -> Option<(&'static str, f64)> {
        let metric = match self {
            OptionToken::All | OptionToken::Help => return None,
            OptionToken::DollarToday => ("Dolar Today", snapshot.usd.transferencia),
            OptionToken::DollarCucuta => ("Dolar Cucuta", snapshot.usd.efectivo_cucuta),
            OptionToken::DollarBitcoin => ("Dolar Bitcoin", snapshot.usd.bitcoin_ref),
            OptionToken::DollarDicom => ("Dolar Dicom", snapshot.usd.promedio_real),
            OptionToken::DollarImplicit => ("Dolar Implicito", snapshot.dollar_implicit()),
            OptionToken::EuroToday => ("Euro Today", snapshot.eur.transferencia),
            OptionToken::EuroCucuta => ("Euro Cucuta", snapshot.eur.efectivo_cucuta),
            OptionToken::EuroBitcoin => ("Euro Bitcoin", snapshot.euro_bitcoin()),
            OptionToken::EuroDicom => ("Euro Dicom", snapshot.eur.promedio_real),
            OptionToken::EuroImplicit => ("Euro Implicito", snapshot.euro_implicit()),
        };
        Some(metric)
    }
}

/// What a run should do, decided from the arguments alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// No arguments: short report, then wait for Enter.
    Summary,
    /// `all` or a single metric.
    Show(OptionToken),
    /// Full usage text.
    Usage,
    /// Unknown token: error line and the short usage line.
    Invalid(String),
}

impl Command {
    /// Chooses the command from the arguments following the program name.
    ///
    /// Extra arguments never select a report. The first argument then only
    /// decides between the full usage (known token) and the invalid-token
    /// message.
    pub fn from_args<I, S>(args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let Some(first) = args.first() else {
            return Command::Summary;
        };
        let first = first.as_ref();

        let command = match (first.parse::<OptionToken>(), args.len()) {
            (Ok(OptionToken::Help), _) => Command::Usage,
            (Ok(token), 1) => Command::Show(token),
            (Ok(_), _) => Command::Usage,
            (Err(UnknownToken(token)), _) => Command::Invalid(token),
        };
        if args.len() > 1 {
            debug!("ignoring {} extra argument(s) after {:?}", args.len() - 1, first);
        }
        command
    }

    /// Whether this command needs the rate snapshot.
    pub fn needs_snapshot(&self) -> bool {
        matches!(self, Command::Summary | Command::Show(_))
    }
}

/// Writes the eight-value report and blocks until the operator presses Enter.
pub fn summary<W: Write, R: BufRead>(
    out: &mut W,
    input: &mut R,
    s: &RateSnapshot,
) -> std::io::Result<()> {
    write!(
        out,
        "\nDOLAR:\nToday: {}bsf\nCucuta: {}bsf\nBitcoin: {}bsf\nDicom: {}\n\nEURO:\nToday: {}bsf\nCucuta: {}bsf\nBitcoin: {}\nDicom: {}\n\nPresione Enter para salir...",
        dotf(s.usd.transferencia),
        dotf(s.usd.efectivo_cucuta),
        dotf(s.usd.bitcoin_ref),
        dotf(s.usd.promedio_real),
        dotf(s.eur.transferencia),
        dotf(s.eur.efectivo_cucuta),
        dotf(s.euro_bitcoin()),
        dotf(s.eur.promedio_real),
    )?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// Writes the ten-value report.
pub fn all<W: Write>(out: &mut W, s: &RateSnapshot) -> std::io::Result<()> {
    write!(
        out,
        "\nDOLAR:\nToday: {}bsf\nCucuta: {}bsf\nBitcoin: {}bsf\nDicom: {}bsf\nImplicito: {}\n\nEURO:\nToday: {}bsf\nCucuta: {}bsf\nBitcoin: {}bsf\nDicom: {}\nImplicito: {}bsf\n",
        dotf(s.usd.transferencia),
        dotf(s.usd.efectivo_cucuta),
        dotf(s.usd.bitcoin_ref),
        dotf(s.usd.promedio_real),
        dotf(s.dollar_implicit()),
        dotf(s.eur.transferencia),
        dotf(s.eur.efectivo_cucuta),
        dotf(s.euro_bitcoin()),
        dotf(s.eur.promedio_real),
        dotf(s.euro_implicit()),
    )
}

/// Writes the report selected by `token`.
pub fn show<W: Write>(out: &mut W, token: OptionToken, s: &RateSnapshot) -> std::io::Result<()> {
    match token {
        OptionToken::All => all(out, s),
        OptionToken::Help => usage(out),
        metric => match metric.metric(s) {
            Some((label, value)) => write!(out, "\n{}: {}bsf\n\n", label, dotf(value)),
            None => Ok(()),
        },
    }
}

/// Writes the full usage text.
pub fn usage<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(
        out,
        "
uso: {PROGRAM_NAME} [help] [all] [dtoday] [dcucuta] [dbitcoin] [ddicom] [dimpli] [etoday] [ecucuta] [dbitcoin] [ddicom] [eimpli]

argumentos opcionales:
  help\tMuestra este mensaje de ayuda
  all\tMuestra el precio del Dolar y del Euro de Dolartoday y Cucuta
  dtoday\tMuestra el precio del Dolar de DolarToday
  dcucuta\tMuestra el precio del Dolar de Cucuta
  dbitcoin\tMuestra el precio del Dolar Bitcoin
  ddicom\tMuestra el precio del Dolar de Dicom
  dimpli\tMuestra el precio del Dolar Implicito (Liquidez Monetaria/Reservas Internacionales) Datos BCV
  etoday\tMuestra el precio del Euro de DolarToday
  ecucuta\tMuestra el precio del Euro de Cucuta
  ebitcoin\tMuestra el precio del Euro Bitcoin
  edicom\tMuestra el precio del Euro de Dicom
  eimpli\tMuestra el precio del Euro Implicito (Liquidez Monetaria/Reservas Internacionales) Datos BCV"
    )
}

/// Writes the error line for `token` and the short usage line.
pub fn invalid<W: Write>(out: &mut W, token: &str) -> std::io::Result<()> {
    writeln!(out, "\n{}", UnknownToken(token.to_string()))?;
    writeln!(
        out,
        "uso: {PROGRAM_NAME} [help] [all] [dtoday] [dcucuta] [dbitcoin] [dimpli] [etoday] [ecucuta] [dbitcoin] [eimpli]"
    )
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn snapshot() -> RateSnapshot {
        let mut s = RateSnapshot::default();
        s.usd.transferencia = 37.5;
        s.usd.efectivo_cucuta = 1250000.5;
        s.usd.bitcoin_ref = 2000.0;
        s.usd.promedio_real = 60.0;
        s.usd.efectivo = 12.25;
        s.eur.transferencia = 43.1;
        s.eur.efectivo_cucuta = 1400000.0;
        s.eur.promedio_real = 70.25;
        s.eur.efectivo = 14.5;
        s.eurusd.rate = 1.25;
        s
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_every_token() {
        let tokens = [
            "all", "help", "dtoday", "dcucuta", "dbitcoin", "ddicom", "dimpli", "etoday",
            "ecucuta", "ebitcoin", "edicom", "eimpli",
        ];
        for token in tokens {
            assert!(token.parse::<OptionToken>().is_ok(), "{token}");
        }
        assert_eq!(
            "DTODAY".parse::<OptionToken>(),
            Err(UnknownToken("DTODAY".into()))
        );
    }

    #[test]
    fn argument_policy() {
        assert_eq!(Command::from_args(Vec::<String>::new()), Command::Summary);
        assert_eq!(
            Command::from_args(["dtoday"]),
            Command::Show(OptionToken::DollarToday)
        );
        assert_eq!(Command::from_args(["all"]), Command::Show(OptionToken::All));
        assert_eq!(Command::from_args(["help"]), Command::Usage);
        assert_eq!(Command::from_args(["xyz"]), Command::Invalid("xyz".into()));
        assert_eq!(Command::from_args(["dtoday", "extra"]), Command::Usage);
        assert_eq!(Command::from_args(["help", "extra"]), Command::Usage);
        assert_eq!(
            Command::from_args(["xyz", "dtoday"]),
            Command::Invalid("xyz".into())
        );
    }

    #[test]
    fn only_reports_need_a_snapshot() {
        assert!(Command::Summary.needs_snapshot());
        assert!(Command::Show(OptionToken::EuroDicom).needs_snapshot());
        assert!(!Command::Usage.needs_snapshot());
        assert!(!Command::Invalid("x".into()).needs_snapshot());
    }

    #[test]
    fn single_metric() {
        let s = snapshot();
        let text = render(|out| show(out, OptionToken::DollarToday, &s));
        assert_eq!(text, "\nDolar Today: 37,5bsf\n\n");

        let text = render(|out| show(out, OptionToken::EuroBitcoin, &s));
        assert_eq!(text, "\nEuro Bitcoin: 2.500bsf\n\n");

        let text = render(|out| show(out, OptionToken::DollarCucuta, &s));
        assert_eq!(text, "\nDolar Cucuta: 1.250.000,5bsf\n\n");
    }

    #[test]
    fn every_metric_reads_its_own_field() {
        let s = snapshot();
        let expected = [
            (OptionToken::DollarToday, "\nDolar Today: 37,5bsf\n\n"),
            (OptionToken::DollarCucuta, "\nDolar Cucuta: 1.250.000,5bsf\n\n"),
            (OptionToken::DollarBitcoin, "\nDolar Bitcoin: 2.000bsf\n\n"),
            (OptionToken::DollarDicom, "\nDolar Dicom: 60bsf\n\n"),
            (OptionToken::DollarImplicit, "\nDolar Implicito: 12,25bsf\n\n"),
            (OptionToken::EuroToday, "\nEuro Today: 43,1bsf\n\n"),
            (OptionToken::EuroCucuta, "\nEuro Cucuta: 1.400.000bsf\n\n"),
            (OptionToken::EuroBitcoin, "\nEuro Bitcoin: 2.500bsf\n\n"),
            (OptionToken::EuroDicom, "\nEuro Dicom: 70,25bsf\n\n"),
            (OptionToken::EuroImplicit, "\nEuro Implicito: 14,5bsf\n\n"),
        ];
        for (token, line) in expected {
            assert_eq!(render(|out| show(out, token, &s)), line, "{token:?}");
        }
    }

    #[test]
    fn implicit_metrics_use_fallback_without_bcv() {
        let s = snapshot();
        assert_eq!(
            OptionToken::DollarImplicit.metric(&s),
            Some(("Dolar Implicito", 12.25))
        );
        assert_eq!(
            OptionToken::EuroImplicit.metric(&s),
            Some(("Euro Implicito", 14.5))
        );
        assert_eq!(OptionToken::All.metric(&s), None);
    }

    #[test]
    fn all_prints_ten_values_without_prompt() {
        let s = snapshot();
        let text = render(|out| show(out, OptionToken::All, &s));
        assert_eq!(
            text,
            "\nDOLAR:\nToday: 37,5bsf\nCucuta: 1.250.000,5bsf\nBitcoin: 2.000bsf\nDicom: 60bsf\nImplicito: 12,25\n\n\
             EURO:\nToday: 43,1bsf\nCucuta: 1.400.000bsf\nBitcoin: 2.500bsf\nDicom: 70,25\nImplicito: 14,5bsf\n"
        );
        assert_eq!(text.lines().filter(|l| l.contains(": ")).count(), 10);
        assert!(!text.contains("Presione Enter"));
    }

    #[test]
    fn summary_waits_for_one_line() {
        let s = snapshot();
        let mut input = Cursor::new(b"\nleftover\n".to_vec());
        let text = render(|out| summary(out, &mut input, &s));
        assert!(text.starts_with("\nDOLAR:\nToday: 37,5bsf\n"));
        assert!(text.contains("\nEURO:\nToday: 43,1bsf\nCucuta: 1.400.000bsf\nBitcoin: 2.500\nDicom: 70,25\n"));
        assert!(text.ends_with("Presione Enter para salir..."));
        assert_eq!(text.lines().filter(|l| l.contains(": ")).count(), 8);
        assert_eq!(input.position(), 1);
    }

    #[test]
    fn summary_returns_on_closed_input() {
        let s = snapshot();
        let mut input = Cursor::new(Vec::new());
        let text = render(|out| summary(out, &mut input, &s));
        assert!(text.ends_with("Presione Enter para salir..."));
    }

    #[test]
    fn invalid_token_message() {
        let text = render(|out| invalid(out, "xyz"));
        assert_eq!(
            text,
            "\nxyz: no es un argumento valido\n\
             uso: dolarToday [help] [all] [dtoday] [dcucuta] [dbitcoin] [dimpli] [etoday] [ecucuta] [dbitcoin] [eimpli]\n"
        );
    }

    #[test]
    fn usage_lists_every_option() {
        let text = render(|out| usage(out));
        assert!(text.starts_with("\nuso: dolarToday [help] [all]"));
        assert!(text.ends_with("Datos BCV\n"));
        for token in ["help", "all", "dtoday", "dimpli", "ebitcoin", "eimpli"] {
            assert!(text.contains(&format!("\n  {token}\t")), "{token}");
        }
    }
}
