//! Tests for command-line parsing and running sessions end to end

#[cfg(test)]
mod tests {
    use clap::Parser;
    use percolate::PercolationError;
    use percolate::algorithm::diagonal::DiagonalBonds;
    use percolate::io::cli::{Cli, SessionRunner};
    use percolate::io::configuration::{DEFAULT_COLS, DEFAULT_ITERATIONS, DEFAULT_ROWS};
    use std::fs;
    use tempfile::TempDir;

    // Tests CLI parsing with no arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["percolate"]);
        let config = cli.config();

        assert_eq!(config.rows, DEFAULT_ROWS);
        assert_eq!(config.cols, DEFAULT_COLS);
        assert_eq!(config.seed, None);
        assert_eq!(config.diagonal, DiagonalBonds::default());
        assert_eq!(cli.iterations, DEFAULT_ITERATIONS);
        assert!(cli.should_show_progress());
    }

    // Tests size and probability flags map onto the session config
    // Verified by ignoring --size when rows are given
    #[test]
    fn test_cli_parse_grid_and_probabilities() {
        let cli = Cli::parse_from([
            "percolate", "-L", "64", "--white", "0.3", "--dwhite", "0.2", "--dblack", "0.4", "-s",
            "99", "-n", "10", "-q",
        ]);
        let config = cli.config();

        assert_eq!((config.rows, config.cols), (64, 64));
        assert!((config.black - 0.7).abs() < 1e-12);
        assert_eq!(
            config.diagonal,
            DiagonalBonds::PerColor {
                white: 0.2,
                black: 0.4,
            }
        );
        assert_eq!(config.seed, Some(99));
        assert_eq!(cli.iterations, 10);
        assert!(!cli.should_show_progress());
    }

    #[test]
    fn test_cli_shared_diagonal_and_zero_seed() {
        let cli = Cli::parse_from([
            "percolate",
            "-r",
            "3",
            "-c",
            "8",
            "--diag",
            "0.6",
            "--diag-black",
            "0.25",
            "--seed",
            "0",
        ]);
        let config = cli.config();

        assert_eq!((config.rows, config.cols), (3, 8));
        assert_eq!(
            config.diagonal,
            DiagonalBonds::Shared {
                probability: 0.6,
                black_share: 0.25,
            }
        );
        assert_eq!(config.seed, None);
    }

    // Tests conflicting flag combinations are rejected
    // Verified by removing the conflicts attributes
    #[test]
    fn test_cli_rejects_conflicts() {
        assert!(Cli::try_parse_from(["percolate", "--diag", "0.5", "--dwhite", "0.1"]).is_err());
        assert!(Cli::try_parse_from(["percolate", "-p", "0.5", "--white", "0.5"]).is_err());
        assert!(Cli::try_parse_from(["percolate", "-L", "5", "-r", "4"]).is_err());
        assert!(Cli::try_parse_from(["percolate", "--diag-black", "0.5"]).is_err());
    }

    // Tests a full run writes the report and image to the requested files
    // Verified by writing the report to stdout regardless of --output
    #[test]
    fn test_runner_writes_report_and_image() {
        let temp_dir = TempDir::new().unwrap();
        let report = temp_dir.path().join("report.txt");
        let image = temp_dir.path().join("grid.png");

        let cli = Cli::parse_from([
            "percolate",
            "-L",
            "8",
            "-n",
            "4",
            "-s",
            "5",
            "-q",
            "-o",
            report.to_str().unwrap(),
            "-i",
            image.to_str().unwrap(),
        ]);
        SessionRunner::new(cli).run().unwrap();

        let text = fs::read_to_string(&report).unwrap();
        assert!(text.contains("# seed: 5"));
        assert!(text.contains("# Iterations: 4"));
        assert!(image.exists());
    }

    #[test]
    fn test_runner_spanning_only_output() {
        let temp_dir = TempDir::new().unwrap();
        let report = temp_dir.path().join("spans.txt");

        let cli = Cli::parse_from([
            "percolate",
            "-L",
            "4",
            "-p",
            "1",
            "-n",
            "2",
            "-q",
            "--spanning-only",
            "-o",
            report.to_str().unwrap(),
        ]);
        SessionRunner::new(cli).run().unwrap();

        assert_eq!(
            fs::read_to_string(&report).unwrap(),
            "1.000000 : 100.000000%\n"
        );
    }

    // Tests errors surface for invalid probabilities and missing patterns
    // Verified by skipping validation in session setup
    #[test]
    fn test_runner_reports_errors() {
        let cli = Cli::parse_from(["percolate", "-L", "4", "-p", "1.5", "-q"]);
        assert!(SessionRunner::new(cli).run().is_err());

        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.png");
        let cli = Cli::parse_from([
            "percolate",
            "-q",
            "--pattern",
            missing.to_str().unwrap(),
        ]);
        assert!(SessionRunner::new(cli).run().is_err());
    }

    // Tests the summary goes to stdout when no output file is given
    // Verified by returning an error from the stdout branch
    #[test]
    fn test_runner_writes_to_stdout() {
        let cli = Cli::parse_from([
            "percolate", "-L", "3", "-p", "1", "-n", "2", "-s", "5", "-q", "--spanning-only",
        ]);
        assert!(SessionRunner::new(cli).run().is_ok());
    }

    // Tests an unwritable report path names the path and the failed operation
    // Verified by mapping create failures to a generic write error
    #[test]
    fn test_runner_maps_report_create_failure() {
        let temp_dir = TempDir::new().unwrap();
        let report = temp_dir.path().join("missing").join("report.txt");
        let cli = Cli::parse_from([
            "percolate",
            "-L",
            "3",
            "-n",
            "1",
            "-q",
            "-o",
            report.to_str().unwrap(),
        ]);

        let error = SessionRunner::new(cli).run().unwrap_err();
        assert!(matches!(
            error,
            PercolationError::FileSystem {
                operation: "create file",
                ref path,
                ..
            } if *path == report
        ));
    }
}
