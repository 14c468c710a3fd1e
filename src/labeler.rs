use std::io::{BufRead, Write};

use crate::classify::{label_sample, Classifier, FixedLabel};
use crate::codec::{CodecError, RecordReader, RecordWriter};
use crate::config::{Config, ConfigError};
use crate::report::LabelReport;

/// Picks the classifier for a run: an explicit profile wins over the config.
pub fn select_classifier(
    config: &Config,
    profile: Option<&str>,
) -> Result<Box<dyn Classifier>, ConfigError> {
    match profile {
        Some(profile) => Ok(Box::new(FixedLabel(profile.to_string()))),
        None => config.classifier(),
    }
}

/// Legacy track ids are dropped when either the flag or the config asks.
pub fn should_upgrade(config: &Config, flag: bool) -> bool {
    flag || config.output.upgrade_legacy
}

/// Labels every record of `input` and writes it to `output`.
///
/// Malformed lines are logged, counted in `report` and skipped. An IO error on
/// either side ends the run with `Err`.
pub fn label_stream<R: BufRead, W: Write>(
    input: R,
    output: W,
    classifier: &dyn Classifier,
    upgrade: bool,
    report: &mut LabelReport,
) -> Result<(), CodecError> {
    let mut writer = RecordWriter::new(output);

    for result in RecordReader::new(input) {
        let record = match result {
            Ok(r) => r,
            Err(e @ CodecError::Line { .. }) => {
                log::warn!("Skipping record: {}", e);
                report.add_error(&e);
                continue;
            }
            Err(e) => return Err(e),
        };

        let mut labeled = label_sample(classifier, &record);
        if upgrade {
            labeled = labeled.upgrade();
        }
        report.add_record(&labeled);
        writer.write(&labeled)?;
    }

    writer.flush()
}
