//! Tests for command-line parsing and full sampling runs

#[cfg(test)]
mod tests {
    use clap::Parser;
    use lozenge::LozengeError;
    use lozenge::io::cli::{Cli, SamplingRun};
    use lozenge::io::configuration::{
        DEFAULT_BIAS, DEFAULT_CHECKPOINT_INTERVAL, DEFAULT_ITERATIONS, DEFAULT_RUN_NAME,
        DEFAULT_SEED,
    };
    use lozenge::io::palette::Palette;
    use lozenge::io::persistence::{load_snapshot, snapshot_path};
    use lozenge::lattice::tiling::TilingState;
    use std::path::{Path, PathBuf};

    fn quiet_cli(dir: &Path, extra: &[&str]) -> Cli {
        let dir = dir.to_string_lossy().into_owned();
        let mut args = vec!["lozenge", "3", "--quiet", "--output-dir", dir.as_str()];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    // Tests parsing with only the required size
    // Verified by changing default constants
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["lozenge", "5"]);

        assert_eq!(cli.size, 5);
        assert_eq!(cli.iterations, DEFAULT_ITERATIONS);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert!((cli.bias - DEFAULT_BIAS).abs() < f64::EPSILON);
        assert_eq!(cli.checkpoint_interval, DEFAULT_CHECKPOINT_INTERVAL);
        assert_eq!(cli.name, DEFAULT_RUN_NAME);
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(!cli.resume && !cli.visualize && !cli.quiet);
        assert!(cli.should_show_progress());
        assert_eq!(cli.log_level(), "info");
    }

    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "lozenge",
            "8",
            "--iterations",
            "500",
            "--seed",
            "7",
            "--bias",
            "2.5",
            "--checkpoint-interval",
            "50",
            "--name",
            "run",
            "--output-dir",
            "out",
            "--resume",
            "--visualize",
            "--pixels",
            "300",
            "--verbose",
        ]);

        assert_eq!(cli.size, 8);
        assert_eq!(cli.iterations, 500);
        assert_eq!(cli.seed, 7);
        assert!((cli.bias - 2.5).abs() < f64::EPSILON);
        assert_eq!(cli.checkpoint_interval, 50);
        assert_eq!(cli.name, "run");
        assert!(cli.resume && cli.visualize);
        assert_eq!(cli.pixels, 300);
        assert_eq!(cli.log_level(), "debug");
        assert_eq!(cli.image_path(), PathBuf::from("out/run_tiling.png"));
        assert_eq!(cli.animation_path(), PathBuf::from("out/run_checkpoints.gif"));

        let config = cli.sampler_config();
        assert_eq!(config.seed, 7);
        assert_eq!(config.checkpoint_interval, 50);
    }

    #[test]
    fn test_cli_requires_size() {
        assert!(Cli::try_parse_from(["lozenge"]).is_err());
        assert!(Cli::try_parse_from(["lozenge", "-3"]).is_err());
    }

    #[test]
    fn test_quiet_lowers_log_level() {
        let cli = Cli::parse_from(["lozenge", "2", "-q"]);
        assert!(!cli.should_show_progress());
        assert_eq!(cli.log_level(), "warn");
    }

    // Tests palette selection from flags
    // Verified by swapping the continuous and discrete branches
    #[test]
    fn test_render_config_palettes() {
        let cli = Cli::parse_from(["lozenge", "2"]);
        assert_eq!(
            cli.render_config().expect("default palette").palette,
            Palette::default()
        );

        let cli = Cli::parse_from(["lozenge", "2", "--continuous"]);
        assert_eq!(
            cli.render_config().expect("continuous").palette,
            Palette::Continuous
        );

        let cli = Cli::parse_from(["lozenge", "2", "--palette", "#000000,#ff0000"]);
        assert_eq!(
            cli.render_config().expect("custom palette").palette,
            Palette::Discrete(vec![[0, 0, 0, 255], [255, 0, 0, 255]])
        );

        let cli = Cli::parse_from(["lozenge", "2", "--palette", "red"]);
        assert!(cli.render_config().is_err());
    }

    #[test]
    fn test_run_writes_outputs() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cli = quiet_cli(
            dir.path(),
            &["--iterations", "120", "--checkpoint-interval", "50", "-p", "120"],
        );
        let summary = SamplingRun::new(cli).process().expect("run succeeds");

        assert_eq!(summary.iterations, 120);
        assert_eq!(summary.snapshot_path, snapshot_path(dir.path(), "hexagon"));
        assert!(summary.snapshot_path.exists());
        assert!(summary.image_path.exists());
        assert_eq!(summary.animation_path, None);

        let snapshot = load_snapshot(dir.path(), "hexagon").expect("snapshot saved");
        let state = TilingState::from_snapshot(&snapshot).expect("valid snapshot");
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_run_with_visualization() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cli = quiet_cli(
            dir.path(),
            &[
                "--iterations",
                "40",
                "--checkpoint-interval",
                "20",
                "--visualize",
                "-p",
                "80",
            ],
        );
        let summary = SamplingRun::new(cli).process().expect("run succeeds");

        let animation = summary.animation_path.expect("animation requested");
        assert!(animation.exists());
    }

    // Tests resuming continues from the saved tiling
    // Verified by ignoring the resume flag in initial_state
    #[test]
    fn test_resume_starts_from_snapshot() {
        let dir = tempfile::tempdir().expect("temp dir");
        let first = quiet_cli(dir.path(), &["--iterations", "200", "-p", "60"]);
        SamplingRun::new(first).process().expect("first run");
        let saved = load_snapshot(dir.path(), "hexagon").expect("snapshot saved");

        let resumed = quiet_cli(dir.path(), &["--iterations", "0", "--resume", "-p", "60"]);
        let run = SamplingRun::new(resumed);
        let state = run.initial_state().expect("resume succeeds");
        assert_eq!(state.snapshot(), saved);
    }

    #[test]
    fn test_resume_without_snapshot_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cli = quiet_cli(dir.path(), &["--resume"]);
        assert!(matches!(
            SamplingRun::new(cli).initial_state(),
            Err(LozengeError::FileSystem { .. })
        ));
    }

    #[test]
    fn test_resume_with_other_size_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let first = quiet_cli(dir.path(), &["--iterations", "10", "-p", "60"]);
        SamplingRun::new(first).process().expect("first run");

        let other_dir = dir.path().to_string_lossy().into_owned();
        let resumed = Cli::parse_from([
            "lozenge",
            "4",
            "--quiet",
            "--resume",
            "--output-dir",
            other_dir.as_str(),
        ]);
        assert!(matches!(
            SamplingRun::new(resumed).initial_state(),
            Err(LozengeError::SnapshotMismatch {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_invalid_bias_fails_run() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cli = quiet_cli(dir.path(), &["--bias", "0", "--iterations", "5"]);
        assert!(SamplingRun::new(cli).process().is_err());
    }
}
