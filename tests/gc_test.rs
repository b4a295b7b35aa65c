// ABOUTME: Heap reachability and collection properties over the public API

use schemelet::Interpreter;

#[test]
fn test_garbage_from_a_run_is_reclaimed() {
    let mut interp = Interpreter::new();
    let baseline = interp.live_values();

    // Nothing here ends up bound, so every allocation the run made must be
    // swept before it returns.
    interp.run("(+ 1 2 3)").unwrap();
    assert_eq!(interp.live_values(), baseline);

    interp.run("(list 1 2 3 4 5)").unwrap();
    assert_eq!(interp.live_values(), baseline);

    interp.run("'(deeply (nested (structure)))").unwrap();
    assert_eq!(interp.live_values(), baseline);
}

#[test]
fn test_garbage_is_reclaimed_on_the_error_path() {
    let mut interp = Interpreter::new();
    let baseline = interp.live_values();

    assert!(interp.run("(car (list 1 2) 3)").is_err());
    assert_eq!(interp.live_values(), baseline);

    assert!(interp.run("(+ 1 (car '()))").is_err());
    assert_eq!(interp.live_values(), baseline);
}

#[test]
fn test_global_definitions_survive_collection() {
    let mut interp = Interpreter::new();
    let baseline = interp.live_values();

    interp.run("(define x 10)").unwrap();
    assert_eq!(interp.live_values(), baseline + 1);
    assert_eq!(interp.run("x").unwrap(), "10");

    // Reading x back allocates only transients.
    assert_eq!(interp.live_values(), baseline + 1);
}

#[test]
fn test_rebinding_releases_the_old_value() {
    let mut interp = Interpreter::new();
    let baseline = interp.live_values();

    interp.run("(define x '(1 2 3 4 5))").unwrap();
    let with_list = interp.live_values();
    assert!(with_list > baseline + 1);

    interp.run("(define x 0)").unwrap();
    assert_eq!(interp.live_values(), baseline + 1);
}

#[test]
fn test_set_mutation_allocates_nothing_lasting() {
    let mut interp = Interpreter::new();
    interp.run("(define counter 0)").unwrap();
    let with_counter = interp.live_values();

    for _ in 0..10 {
        interp.run("(set! counter (+ counter 1))").unwrap();
        assert_eq!(interp.live_values(), with_counter);
    }
    assert_eq!(interp.run("counter").unwrap(), "10");
}

#[test]
fn test_collect_is_idempotent() {
    let mut interp = Interpreter::new();
    interp.run("(define x (cons 1 2))").unwrap();
    interp.run("(define (f n) (+ n 1))").unwrap();

    let after_runs = interp.live_values();
    interp.collect();
    assert_eq!(interp.live_values(), after_runs);
    interp.collect();
    assert_eq!(interp.live_values(), after_runs);
}

#[test]
fn test_captured_environment_keeps_its_values_alive() {
    let mut interp = Interpreter::new();
    interp
        .run("(define (make-adder n) (lambda (x) (+ x n)))")
        .unwrap();
    interp.run("(define add5 (make-adder 5))").unwrap();

    // The frame binding n=5 is reachable only through the closure; several
    // collections later it must still be usable.
    interp.collect();
    interp.collect();
    assert_eq!(interp.run("(add5 3)").unwrap(), "8");
}

#[test]
fn test_unreturned_closures_are_reclaimed() {
    let mut interp = Interpreter::new();
    interp
        .run("(define (outer) (define (inner x) x) (inner 7))")
        .unwrap();
    let with_outer = interp.live_values();

    // The inner closure and its frame live only for the duration of the
    // call, even though they form a closure/environment cycle.
    assert_eq!(interp.run("(outer)").unwrap(), "7");
    assert_eq!(interp.live_values(), with_outer);
}

#[test]
fn test_recursive_closure_is_collected_when_rebound() {
    let mut interp = Interpreter::new();
    let baseline = interp.live_values();

    // The closure references itself through its captured frame.
    interp.run("(define (f n) (if (= n 0) 0 (f (- n 1))))").unwrap();
    assert_eq!(interp.run("(f 10)").unwrap(), "0");

    interp.run("(define f 0)").unwrap();
    assert_eq!(interp.live_values(), baseline + 1);
}

#[test]
fn test_cyclic_pair_structure_is_reclaimed() {
    let mut interp = Interpreter::new();
    let baseline = interp.live_values();

    interp.run("(define p (cons 1 2))").unwrap();
    interp.run("(set-cdr! p p)").unwrap();

    // Rebinding p leaves a self-referential pair with no path from the
    // root; the sweep must still dissolve it.
    interp.run("(define p 0)").unwrap();
    assert_eq!(interp.live_values(), baseline + 1);
}

#[test]
fn test_mutated_structure_stays_reachable() {
    let mut interp = Interpreter::new();
    interp.run("(define p (cons 1 '()))").unwrap();
    interp.run("(set-cdr! p (cons 2 '()))").unwrap();
    assert_eq!(interp.run("p").unwrap(), "(1 2)");
    interp.collect();
    assert_eq!(interp.run("p").unwrap(), "(1 2)");
}
