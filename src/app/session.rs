use crate::app::export::export_estimate;
use crate::core::estimator::CostEstimator;
use crate::core::format::Summary;
use crate::core::{InputField, Mode, Notifier, Storage};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::check_inputs;
use std::io::{BufRead, Write};
use std::str::FromStr;

const HELP: &str = "\
Commands:
  set <field> <value>   edit an input (invalid numbers count as 0)
  mode <mode>           switch mode: duration (1) or instalment (2)
  show                  print inputs and results
  json                  print the estimate as JSON
  submit                submit the current input record
  export <file>         write the estimate to .csv, .tsv or .json
  help                  show this help
  quit                  leave the form";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set { field: InputField, raw: String },
    Mode(Mode),
    Show,
    Json,
    Submit,
    Export(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = EstimatorError;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let keyword = parts.next().unwrap_or_default().to_ascii_lowercase();
        let rest: Vec<&str> = parts.collect();

        let missing = |what: &str| EstimatorError::UnknownCommand {
            command: format!("{} (missing {})", line.trim(), what),
        };

        match keyword.as_str() {
            "set" => {
                let field: InputField = rest.first().ok_or_else(|| missing("field"))?.parse()?;
                // 缺少數值視同空白輸入
                let raw = rest.get(1..).map(|v| v.join(" ")).unwrap_or_default();
                Ok(Command::Set { field, raw })
            }
            "mode" => Ok(Command::Mode(
                rest.first().ok_or_else(|| missing("mode"))?.parse::<Mode>()?,
            )),
            "show" => Ok(Command::Show),
            "json" => Ok(Command::Json),
            "submit" => Ok(Command::Submit),
            "export" => Ok(Command::Export(
                rest.first().ok_or_else(|| missing("file"))?.to_string(),
            )),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(EstimatorError::UnknownCommand {
                command: line.trim().to_string(),
            }),
        }
    }
}

/// Interactive form bound to one estimator. Every edit re-renders the results.
pub struct FormSession<N: Notifier, S: Storage> {
    estimator: CostEstimator,
    notifier: N,
    storage: S,
}

impl<N: Notifier, S: Storage> FormSession<N, S> {
    pub fn new(estimator: CostEstimator, notifier: N, storage: S) -> Self {
        Self {
            estimator,
            notifier,
            storage,
        }
    }

    pub fn estimator(&self) -> &CostEstimator {
        &self.estimator
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn into_estimator(self) -> CostEstimator {
        self.estimator
    }

    /// Reads commands until `quit` or end of input. Command errors are
    /// reported on `output` and the session keeps going.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "Mode: {}", self.estimator.mode())?;
        self.render(&mut output)?;
        writeln!(output, "Type 'help' for commands.")?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    tracing::debug!("Rejected input {:?}: {}", line, e);
                    writeln!(output, "❌ {}", e.user_friendly_message())?;
                    writeln!(output, "💡 {}", e.recovery_suggestion())?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }

            if let Err(e) = self.execute(command, &mut output) {
                tracing::warn!("❌ Command failed: {} (Category: {:?})", e, e.category());
                writeln!(output, "❌ {}", e.user_friendly_message())?;
                writeln!(output, "💡 {}", e.recovery_suggestion())?;
            }
        }

        tracing::debug!("Form session closed");
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: Command, output: &mut W) -> Result<()> {
        match command {
            Command::Set { field, raw } => {
                self.estimator.set_raw_field(field, &raw)?;
                for warning in check_inputs(self.estimator.input()) {
                    if warning.field == field {
                        tracing::warn!("⚠️ {}", warning);
                        writeln!(output, "⚠️ {}", warning)?;
                    }
                }
                self.render(output)?;
            }
            Command::Mode(mode) => {
                self.estimator.set_mode(mode);
                writeln!(output, "Mode: {}", mode)?;
                self.render(output)?;
            }
            Command::Show => {
                self.render_inputs(output)?;
                self.render(output)?;
            }
            Command::Json => {
                let json = serde_json::to_string_pretty(&self.estimator.estimate())?;
                writeln!(output, "{}", json)?;
            }
            Command::Submit => {
                self.estimator.submit(&self.notifier)?;
            }
            Command::Export(path) => {
                let written = export_estimate(&self.storage, &path, &self.estimator.estimate())?;
                writeln!(output, "📁 Saved to {}", written)?;
            }
            Command::Help => writeln!(output, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn render<W: Write>(&self, output: &mut W) -> Result<()> {
        let result = self.estimator.output();
        write!(output, "{}", Summary::new(self.estimator.mode(), &result))?;
        Ok(())
    }

    fn render_inputs<W: Write>(&self, output: &mut W) -> Result<()> {
        let input = self.estimator.input();
        for field in InputField::ALL {
            if !self.estimator.is_editable(field) {
                continue;
            }
            writeln!(output, "  {:<28} {}", field.label(), input.get(field))?;
        }
        Ok(())
    }
}
