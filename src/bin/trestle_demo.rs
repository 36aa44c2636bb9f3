// Demonstration test binary: a handful of suites run through the trestle CLI.
// Usage: cargo run --bin trestle-demo -- [-hlfv] [-s SUITE] [-t TEST]
//
// The `arithmetic` suite contains one deliberately failing test, so a full
// run exits with a failure status.

use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;

use trestle::{ensure, ensure_eq, ensure_in_range, ensure_str_eq, pass, skip, Registry, Suite};

fn arithmetic(suite: &mut Suite<'_>) {
    suite.run_test("adds", || {
        ensure_eq!(4, 2 + 2);
        pass!()
    });
    suite.run_test("subtracts", || {
        ensure_eq!(1, 3 - 2);
        pass!()
    });
    suite.run_test("sums_floats", || {
        ensure_in_range!(0.3, 0.1 + 0.2, 1e-9);
        pass!()
    });
    suite.run_test("halves", || {
        ensure_eq!(4, 7 / 2);
        pass!()
    });
    suite.run_test("multiplies", || {
        ensure_eq!(6, 2 * 3);
        pass!()
    });
}

fn strings(suite: &mut Suite<'_>) {
    suite.run_test("joins", || {
        let joined = ["a", "b", "c"].join("-");
        ensure_str_eq!("a-b-c", joined);
        pass!()
    });
    suite.run_test("trims", || {
        ensure_str_eq!("pad", "  pad  ".trim());
        pass!()
    });
    suite.run_test("counts_graphemes", || {
        skip!("grapheme clusters are not counted yet")
    });
}

fn fixtures(suite: &mut Suite<'_>) {
    let opened = Rc::new(Cell::new(0u32));
    let closed = Rc::new(Cell::new(0u32));

    let on_setup = opened.clone();
    suite.set_setup(move || on_setup.set(on_setup.get() + 1));
    suite.set_teardown_with(closed.clone(), |closed: &mut Rc<Cell<u32>>| {
        closed.set(closed.get() + 1)
    });

    for name in ["setup_precedes_body", "teardown_follows_body"] {
        let (opened, closed) = (opened.clone(), closed.clone());
        suite.run_test(name, move || {
            ensure!(opened.get() > 0, "setup never ran");
            ensure_eq!(opened.get(), closed.get() + 1);
            pass!("{} setups, {} teardowns", opened.get(), closed.get())
        });
    }
}

fn pending(suite: &mut Suite<'_>) {
    suite.run_test("later", || skip!());
}

fn registry() -> Registry {
    Registry::new()
        .suite("arithmetic", arithmetic)
        .suite("strings", strings)
        .suite("fixtures", fixtures)
        .suite("pending", pending)
}

fn main() -> ExitCode {
    trestle::cli::main(&registry())
}
