// Reporting text: verbose lines, compact wrapping, string mismatch blocks,
// and a reporting stream that fails.

use std::io::{self, Write};
use std::time::Duration;

use pretty_assertions::assert_eq;
use termcolor::NoColor;
use trestle::cli::output::OutputBuffer;
use trestle::clock::{FrozenClock, SteppingClock};
use trestle::{ensure_str_eq, pass, Flags, Harness, Outcome, RunConfig, TrestleError};

fn run(config: RunConfig, body: impl FnOnce(&mut Harness)) -> String {
    let output = OutputBuffer::new();
    let mut harness = Harness::new(&config, output.clone()).with_clock(FrozenClock);
    body(&mut harness);
    harness.finish().unwrap();
    output.contents()
}

#[test]
fn verbose_suite() {
    let text = run(RunConfig::default().with_flags(Flags::VERBOSE), |h| {
        h.run_suite("verbose", |suite| {
            suite.run_test("plain", Outcome::pass);
            suite.run_test("noted", || Outcome::pass_with("all good"));
            suite.run_test("broken", || Outcome::fail("1 != 2", "src/x.rs", 12));
            suite.run_test("pending", || Outcome::skip_with("not yet"));
        });
    });
    assert_eq!(
        text,
        "\n* Suite verbose:\n\
         PASS plain (0 ticks, 0.000 sec)\n\
         PASS noted: all good (0 ticks, 0.000 sec)\n\
         FAIL broken: 1 != 2 (src/x.rs:12) (0 ticks, 0.000 sec)\n\
         SKIP pending: not yet (0 ticks, 0.000 sec)\n\
         \n4 tests - 2 pass, 1 fail, 1 skipped (0 ticks, 0.000 sec)\n\
         \nTotal: 4 tests (0 ticks, 0.000 sec)\n\
         Pass: 2, fail: 1, skip: 1.\n"
    );
}

#[test]
fn compact_output_wraps_at_width() {
    let text = run(RunConfig::default().with_width(4), |h| {
        h.run_suite("wide", |suite| {
            for _ in 0..9 {
                suite.run_test("t", Outcome::pass);
            }
        });
    });
    assert!(text.starts_with("\n* Suite wide:\n....\n....\n.\n9 tests"), "{}", text);
}

#[test]
fn column_restarts_with_each_suite() {
    let text = run(RunConfig::default().with_width(3), |h| {
        for name in ["a", "b"] {
            h.run_suite(name, |suite| {
                suite.run_test("t1", Outcome::pass);
                suite.run_test("t2", Outcome::pass);
            });
        }
    });
    assert!(text.contains("* Suite a:\n..\n2 tests"), "{}", text);
    assert!(text.contains("* Suite b:\n..\n2 tests"), "{}", text);
}

#[test]
fn multi_line_string_mismatch_shows_blocks_and_diff() {
    let text = run(RunConfig::default(), |h| {
        h.run_suite("text", |suite| {
            suite.run_test("lines", || {
                let actual = "a\nx\nc".to_string();
                ensure_str_eq!("a\nb\nc", actual);
                pass!()
            });
        });
    });
    assert!(text.contains("F\nFAIL lines: \"a\\nb\\nc\" != actual ("), "{}", text);
    assert!(
        text.contains("Expected:\n####\na\nb\nc\n####\nActual:\n####\na\nx\nc\n####\n"),
        "{}",
        text
    );
    let lines: Vec<&str> = text.lines().collect();
    for expected in [" a", "-b", "+x", " c"] {
        assert!(lines.contains(&expected), "missing {:?} in {}", expected, text);
    }
}

#[test]
fn elapsed_time_comes_from_the_clock() {
    let output = OutputBuffer::new();
    let mut harness = Harness::new(&RunConfig::default().with_flags(Flags::VERBOSE), output.clone())
        .with_clock(SteppingClock::new(Duration::from_millis(1)));
    harness.run_suite("timed", |suite| suite.run_test("t", Outcome::pass));
    harness.finish().unwrap();
    // begin, pre-suite, pre-test, post-test, post-suite, end: one step apart.
    let text = output.contents();
    assert!(text.contains("PASS t (1000 ticks, 0.001 sec)"), "{}", text);
    assert!(text.contains("1 tests - 1 pass, 0 fail, 0 skipped (3000 ticks, 0.003 sec)"), "{}", text);
    assert!(text.contains("Total: 1 tests (5000 ticks, 0.005 sec)"), "{}", text);
}

struct Rejecting;

impl Write for Rejecting {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn failed_writes_surface_once_at_finish() {
    let mut harness = Harness::new(&RunConfig::default(), NoColor::new(Rejecting));
    let ran = std::cell::Cell::new(0);
    harness.run_suite("s", |suite| {
        suite.run_test("a", || {
            ran.set(ran.get() + 1);
            Outcome::pass()
        });
        suite.run_test("b", || {
            ran.set(ran.get() + 1);
            Outcome::pass()
        });
    });
    assert_eq!(ran.get(), 2);
    match harness.finish() {
        Err(TrestleError::Output(err)) => assert_eq!(err.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected an output error, got {:?}", other),
    }
}
