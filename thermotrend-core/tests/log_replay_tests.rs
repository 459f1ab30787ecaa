//! Bench log files through the full replay path

#[cfg(feature = "std")]
mod tests {
    use std::fs;
    use std::io::{BufWriter, Write};

    use tempfile::{tempdir, NamedTempFile};
    use thermotrend_core::{
        stream::{replay, LogStream, OutputWriter, Stream, StreamError},
        ChannelState, ClassificationEngine, EngineConfig,
    };

    fn write_log(lines: &[String]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    fn log_line(second: u32, value: f64) -> String {
        let minute = second / 60;
        let second = second % 60;
        format!(
            "14/03/20 15:{:02}:{:02}.000 C C T1={:.2} T2={:.2} T3={:.2} T4={:.2}",
            minute, second, value, value, value, value
        )
    }

    #[test]
    fn reads_samples_and_annotations_from_disk() {
        let file = write_log(&[
            log_line(0, 21.0),
            log_line(1, 21.5),
            "\t\t\t\t\t\t\t\t\tdevice on".to_string(),
            log_line(2, 22.0),
            "\t\t\t\t\t\t\t\t\tdevice off".to_string(),
        ]);

        let mut stream = LogStream::open(file.path()).unwrap();

        let first = stream.poll_next().unwrap();
        assert_eq!(first.timestamp, 1_584_198_000);
        assert_eq!(first.manual_override, [ChannelState::Unchanged; 4]);

        let second = stream.poll_next().unwrap();
        assert_eq!(second.readings, [21.5; 4]);
        assert_eq!(second.manual_override, [ChannelState::Rising; 4]);

        let third = stream.poll_next().unwrap();
        assert_eq!(third.manual_override, [ChannelState::Falling; 4]);

        match stream.poll_next() {
            Err(nb::Error::Other(StreamError::EndOfStream)) => {}
            other => panic!("expected EndOfStream, got {:?}", other),
        }

        let stats = stream.stats();
        assert_eq!(stats.samples_read, 3);
        assert_eq!(stats.annotations, 2);
        assert_eq!(stats.parse_errors, 0);
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempdir().unwrap();
        let result = LogStream::open(dir.path().join("missing.log"));
        assert!(matches!(result, Err(StreamError::Transport(_))));
    }

    #[test]
    fn replays_log_file_into_output_file() {
        // Steady heating on every channel, one reading per second
        let mut lines: Vec<String> = (0..40).map(|s| log_line(s, 20.0 + s as f64 * 0.5)).collect();
        lines.insert(20, "not a sample".to_string());
        let input = write_log(&lines);

        let dir = tempdir().unwrap();
        let out_path = dir.path().join("classified.txt");

        let config = EngineConfig::default()
            .with_history_capacity(512)
            .with_sma_window(3)
            .with_sampling_window(4);
        let mut engine = ClassificationEngine::with_config(config).unwrap();
        let mut source = LogStream::open(input.path()).unwrap();
        let mut output = OutputWriter::new(BufWriter::new(fs::File::create(&out_path).unwrap()));

        let stats = replay(&mut source, &mut engine, &mut output).unwrap();
        drop(output);

        assert_eq!(stats.samples, 40);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.activations, 1);
        // First vote lands on index 8
        assert_eq!(stats.device_on, 32);

        let text = fs::read_to_string(&out_path).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 40);

        // 17 columns: timestamp, 4 raw, 4 smoothed, 4 states, 4 annotations
        for row in &rows {
            assert_eq!(row.split(' ').count(), 17);
        }
        assert!(rows[0].starts_with("1584198000 20.000000"));
        assert!(rows[39].contains(" 1 1 1 1 0 0 0 0"));
    }
}
