use std::fs::File;
use std::io::{BufReader, Write};

use tracing::debug;

use crate::cliopt::{CliOpt, Encoding};
use crate::common::time::TimeRange;
use crate::error::Result;
use crate::input::{read_label_dictionary, read_rows, Epoch};
use crate::model::{LabelMatcher, SampleValue, Timestamp};
use crate::output::{Encoder, HumanReadableEncoder, LineWriter, PromApiEncoder, Writer};
use crate::series::{build_series_set, LabelResolver, Row, SampleIterator, SeriesSet};

// rows.json + labels.json
//   -> Vec<Row>, LabelDictionary
//     -> SeriesSet (one label resolution)
//       -> Series [filtered by matchers]
//         -> samples [restricted to the time range]
//           -> Encoder -> Writer

pub struct Runner<'a> {
    encoder: Box<dyn Encoder>,
    writer: Box<dyn Writer + 'a>,
    matchers: Vec<LabelMatcher>,
    range: TimeRange,
}

impl<'a> Runner<'a> {
    pub fn new(encoder: Box<dyn Encoder>, writer: Box<dyn Writer + 'a>) -> Self {
        Self {
            encoder,
            writer,
            matchers: vec![],
            range: TimeRange::infinity(),
        }
    }

    pub fn with_matchers(mut self, matchers: Vec<LabelMatcher>) -> Self {
        self.matchers = matchers;
        self
    }

    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = range;
        self
    }

    /// Writes every matching series with at least one sample in range and
    /// returns how many were written. The series set is always closed and
    /// the writer always flushed. The first error wins.
    pub fn run<R>(&mut self, rows: Vec<Row>, resolver: &R) -> Result<usize>
    where
        R: LabelResolver + ?Sized,
    {
        let mut set = build_series_set(rows, resolver);
        let written = self.drain(set.as_mut());
        set.close();
        let flushed = self.writer.flush();

        let written = written?;
        if let Some(err) = set.err() {
            return Err(err);
        }
        flushed?;

        Ok(written)
    }

    fn drain(&mut self, set: &mut dyn SeriesSet) -> Result<usize> {
        let mut written = 0;

        while set.next() {
            let series = match set.at() {
                Some(series) => series,
                None => continue,
            };

            if !self.matchers.iter().all(|m| m.matches_labels(series.labels())) {
                continue;
            }

            let samples = self.collect_samples(&mut series.iterator());
            if samples.is_empty() {
                debug!(labels = ?series.labels(), "no samples in range");
                continue;
            }

            let buf = self.encoder.encode(series.labels(), &samples)?;
            self.writer.write(&buf)?;
            written += 1;
        }

        Ok(written)
    }

    fn collect_samples(&self, it: &mut dyn SampleIterator) -> Vec<(Timestamp, SampleValue)> {
        let mut found = match self.range.start() {
            Some(start) => it.seek(start),
            None => it.next(),
        };

        let mut samples = vec![];
        while found {
            let (ts, value) = it.at();
            if !self.range.contains(ts) {
                break;
            }
            samples.push((ts, value));
            found = it.next();
        }
        samples
    }
}

/// Runs the whole pipeline for the command line options, writing to `out`.
pub fn run<W: Write>(opt: &CliOpt, out: W) -> Result<usize> {
    let epoch = if opt.pg_epoch {
        Epoch::Postgres
    } else {
        Epoch::Unix
    };

    let rows = read_rows(BufReader::new(File::open(&opt.rows)?), epoch)?;
    let dictionary = read_label_dictionary(BufReader::new(File::open(&opt.labels)?))?;

    let encoder: Box<dyn Encoder> = match opt.encode {
        Encoding::PromApi => Box::new(PromApiEncoder::new()),
        Encoding::HumanReadable => Box::new(HumanReadableEncoder::new()),
    };

    let mut runner = Runner::new(encoder, Box::new(LineWriter::new(out)))
        .with_matchers(opt.matchers.iter().map(LabelMatcher::clone).collect())
        .with_range(TimeRange::new(opt.since, opt.until)?);

    runner.run(rows, &dictionary)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io;

    use super::*;
    use crate::error::Error;
    use crate::model::{parse_matcher, Label};
    use crate::series::{LabelDictionary, LabelIdMap};

    fn dictionary() -> LabelDictionary {
        vec![
            (1, Label::new("__name__", "foo")),
            (2, Label::new("job", "a")),
            (3, Label::new("job", "b")),
        ]
        .into_iter()
        .collect()
    }

    fn rows() -> Vec<Row> {
        let times: Vec<Timestamp> = vec![1000, 2000, 3000, 4000];
        let values: Vec<Option<SampleValue>> = vec![Some(1.0), None, Some(3.0), Some(4.0)];
        let other: Vec<Timestamp> = vec![1000, 2000];
        vec![
            Row::new(times, values, vec![1, 2]),
            Row::new(other, vec![Some(5.0), Some(6.0)], vec![1, 3]),
        ]
    }

    fn run_with(
        rows: Vec<Row>,
        matchers: Vec<LabelMatcher>,
        range: TimeRange,
    ) -> Result<(usize, String)> {
        let mut out = Vec::new();
        let written = Runner::new(
            Box::new(HumanReadableEncoder::new()),
            Box::new(LineWriter::new(&mut out)),
        )
        .with_matchers(matchers)
        .with_range(range)
        .run(rows, &dictionary())?;

        Ok((written, String::from_utf8_lossy(&out).into_owned()))
    }

    #[test]
    fn test_run_all() -> Result<()> {
        let (written, out) = run_with(rows(), vec![], TimeRange::infinity())?;

        assert_eq!(2, written);
        assert_eq!(
            "foo{job=\"a\"}\n\
             \t1970-01-01T00:00:01.000\t1\n\
             \t1970-01-01T00:00:03.000\t3\n\
             \t1970-01-01T00:00:04.000\t4\n\
             foo{job=\"b\"}\n\
             \t1970-01-01T00:00:01.000\t5\n\
             \t1970-01-01T00:00:02.000\t6\n",
            out
        );
        Ok(())
    }

    #[test]
    fn test_run_with_matchers_and_range() -> Result<()> {
        let (written, out) = run_with(
            rows(),
            vec![parse_matcher("job=a")?],
            TimeRange::new(Some(1500), Some(3000))?,
        )?;

        assert_eq!(1, written);
        assert_eq!("foo{job=\"a\"}\n\t1970-01-01T00:00:03.000\t3\n", out);
        Ok(())
    }

    #[test]
    fn test_run_skips_series_out_of_range() -> Result<()> {
        let (written, out) = run_with(rows(), vec![], TimeRange::new(Some(3500), None)?)?;

        assert_eq!(1, written);
        assert_eq!("foo{job=\"a\"}\n\t1970-01-01T00:00:04.000\t4\n", out);
        Ok(())
    }

    #[test]
    fn test_run_reports_row_errors() {
        let mut rows = rows();
        rows.insert(1, Row::failed(Error::row_fetch("boom")));

        let err = run_with(rows, vec![], TimeRange::infinity()).unwrap_err();
        assert!(matches!(err.inner(), Error::RowFetch(_)));
    }

    struct CountingWriter<'a> {
        writes: &'a Cell<usize>,
        flushes: &'a Cell<usize>,
    }

    impl<'a> Writer for CountingWriter<'a> {
        fn write(&mut self, _: &[u8]) -> io::Result<()> {
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes.set(self.flushes.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_run_flushes_on_error() {
        let (writes, flushes) = (Cell::new(0), Cell::new(0));
        let writer = CountingWriter {
            writes: &writes,
            flushes: &flushes,
        };

        let mut rows = rows();
        rows.push(Row::failed(Error::row_fetch("boom")));

        let err = Runner::new(Box::new(HumanReadableEncoder::new()), Box::new(writer))
            .run(rows, &dictionary())
            .unwrap_err();

        assert!(matches!(err.inner(), Error::RowFetch(_)));
        assert_eq!(2, writes.get());
        assert_eq!(1, flushes.get());
    }

    #[test]
    fn test_run_reports_resolution_errors() {
        let resolver = |_: &mut LabelIdMap| -> Result<()> { Err(Error::resolution("down")) };

        let mut out = Vec::new();
        let err = Runner::new(
            Box::new(PromApiEncoder::new()),
            Box::new(LineWriter::new(&mut out)),
        )
        .run(rows(), &resolver)
        .unwrap_err();

        assert!(matches!(err, Error::Resolution(_)));
        assert!(out.is_empty());
    }
}
