#![allow(clippy::float_cmp)]

use lazo::{
    Bound, Bounds, Expr, PiecewiseLinear, Problem, Sense, SolverConfig, TerminateStatus, Variable,
};

const TOL: f64 = 1e-6;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn minimize_negated_and() {
    init_tracing();
    let x = Variable::binary("x");
    let y = Variable::binary("y");
    let z = lazo::and(&x, &y).unwrap();

    let mut problem = Problem::new(Some("and"), Sense::Minimize);
    problem.set_objective(-&z).unwrap();
    assert_eq!(problem.num_constraints(), 3);

    let solution = lazo::solve(&mut problem, &SolverConfig::new()).unwrap();
    assert_eq!(solution.status, TerminateStatus::Normal);
    assert!((problem.objective_value() + 1.0).abs() < TOL);
    assert!((x.value() - 1.0).abs() < TOL);
    assert!((y.value() - 1.0).abs() < TOL);
}

#[test]
fn minimize_or() {
    let x = Variable::binary("x");
    let y = Variable::binary("y");
    let z = lazo::or(&x, &y).unwrap();

    let mut problem = Problem::new(Some("or"), Sense::Minimize);
    problem.set_objective(&z).unwrap();
    lazo::solve(&mut problem, &SolverConfig::new()).unwrap();

    assert_eq!(problem.status(), Some(TerminateStatus::Normal));
    assert!(problem.objective_value().abs() < TOL);
    assert!(x.value().abs() < TOL || y.value().abs() < TOL);
}

#[test]
fn xor_forces_exactly_one() {
    let x = Variable::binary("x");
    let y = Variable::binary("y");
    let z = lazo::xor(&x, &y).unwrap();

    let mut problem = Problem::new(Some("xor"), Sense::Maximize);
    problem.set_objective(&z).unwrap();
    problem.add_constraint(Expr::var(&x).equal(1.0)).unwrap();
    lazo::solve(&mut problem, &SolverConfig::new()).unwrap();

    assert!((problem.objective_value() - 1.0).abs() < TOL);
    assert!(y.value().abs() < TOL);
}

#[test]
fn minimize_abs_of_negative_integer() {
    let x = Variable::integer("x", Bounds::new(-5.0, -1.0));
    let y = lazo::abs(&x);

    let mut problem = Problem::new(Some("abs"), Sense::Minimize);
    problem.set_objective(&y).unwrap();
    lazo::solve(&mut problem, &SolverConfig::new()).unwrap();

    assert!((problem.objective_value() - 1.0).abs() < TOL);
    assert!((x.value() + 1.0).abs() < TOL);
}

#[test]
fn piecewise_log_at_breakpoint_and_between() {
    let approx = PiecewiseLinear::new(f64::ln, 1.0, 10.0, 3).unwrap();

    let at_one = Variable::continuous("at_one", Bounds::new(1.0, 1.0));
    let y = lazo::piecewise(&approx, &at_one);
    let mut problem = Problem::new(Some("pl_breakpoint"), Sense::Minimize);
    problem.set_objective(&y).unwrap();
    lazo::solve(&mut problem, &SolverConfig::new()).unwrap();
    assert_eq!(problem.status(), Some(TerminateStatus::Normal));
    assert!(y.value().abs() < TOL);

    let between = Variable::continuous("between", Bounds::new(3.25, 3.25));
    let y = lazo::piecewise(&approx, &between);
    let mut problem = Problem::new(Some("pl_between"), Sense::Maximize);
    problem.set_objective(&y).unwrap();
    lazo::solve(&mut problem, &SolverConfig::new()).unwrap();
    assert!((y.value() - 0.5 * 5.5_f64.ln()).abs() < 1e-5);
}

#[test]
fn piecewise_of_expression() {
    let a = Variable::continuous("a", Bounds::new(0.0, 2.0));
    let b = Variable::continuous("b", Bounds::new(0.0, 2.0));
    let approx = PiecewiseLinear::new(|v| v * v, 0.0, 4.0, 5).unwrap();
    let square = lazo::piecewise(&approx, &a + &b);

    let mut problem = Problem::new(Some("pl_sum"), Sense::Minimize);
    problem.set_objective(&square).unwrap();
    problem.add_constraint((&a + &b).equal(3.0)).unwrap();
    lazo::solve(&mut problem, &SolverConfig::new()).unwrap();

    // 3 is a breakpoint of x^2 on [0, 4] with 5 samples.
    assert!((problem.objective_value() - 9.0).abs() < 1e-5);
}

#[test]
fn shared_auxiliary_attaches_once_per_problem() {
    let x = Variable::binary("x");
    let y = Variable::binary("y");
    let z = lazo::and(&x, &y).unwrap();

    let mut first = Problem::new(Some("first"), Sense::Maximize);
    first.set_objective(&z).unwrap();
    first.add_constraint(Expr::var(&z).le(1.0)).unwrap();
    first.add_constraint(Expr::var(&x).le(&z)).unwrap();
    assert_eq!(first.num_constraints(), 3 + 2);

    let mut second = Problem::new(Some("second"), Sense::Minimize);
    second.add_constraint(Expr::var(&z).ge(0.0)).unwrap();
    assert_eq!(second.num_constraints(), 1 + 3);

    lazo::solve(&mut first, &SolverConfig::new()).unwrap();
    assert!((z.value() - 1.0).abs() < TOL);
    assert_eq!(first.num_constraints(), 5);
}

#[test]
fn nested_encoders_solve() {
    let x = Variable::binary("x");
    let y = Variable::binary("y");
    let w = Variable::binary("w");
    let either = lazo::or(&x, &y).unwrap();
    let all = lazo::and(&either, &w).unwrap();

    let mut problem = Problem::new(Some("nested"), Sense::Maximize);
    problem.set_objective(&all).unwrap();
    assert_eq!(problem.num_constraints(), 3 + 3);
    problem.add_constraint(Expr::var(&x).equal(0.0)).unwrap();
    lazo::solve(&mut problem, &SolverConfig::new()).unwrap();

    assert!((problem.objective_value() - 1.0).abs() < TOL);
    assert!((y.value() - 1.0).abs() < TOL);
    assert!((w.value() - 1.0).abs() < TOL);
}

#[test]
fn bound_queries() {
    let x = Variable::integer("bx", Bounds::new(-5.0, -1.0));
    let abs = lazo::abs(&x);
    assert_eq!(lazo::min_value(&Expr::var(&abs)).value().map(f64::round), Some(1.0));
    // Nothing bounds the auxiliary from above.
    assert_eq!(lazo::max_value(&Expr::var(&abs)), Bound::Unbounded);

    let t = Variable::continuous("t", Bounds::new(0.0, 4.0));
    let shifted = Expr::var(&t) - 1.0;
    let square = shifted.mul_expr(&shifted).unwrap();
    let low = lazo::min_value(&square).value().unwrap();
    assert!(low.abs() < 1e-5);

    let cube = square.mul_expr(&Expr::var(&t)).unwrap();
    assert_eq!(lazo::max_value(&cube), Bound::Unknown);
    assert_eq!(lazo::max_value(&Expr::from_constant(2.5)), Bound::Value(2.5));
}

#[test]
fn bound_queries_on_binary_product_and_auxiliaries() {
    let x = Variable::binary("px");
    let y = Variable::binary("py");
    let product = Expr::var(&x).mul_expr(&Expr::var(&y)).unwrap();
    // The quadratic backend takes continuous columns only.
    assert_eq!(lazo::max_value(&product), Bound::Unknown);

    let z = lazo::and(&x, &y).unwrap();
    for _ in 0..3 {
        assert_eq!(lazo::max_value(&Expr::var(&z)).value().map(f64::round), Some(1.0));
    }
    assert!(z.attached_problems().is_empty());
}

#[test]
fn non_binary_operand_fails_at_call_time() {
    let x = Variable::binary("x");
    let c = Variable::continuous("c", Bounds::new(0.0, 1.0));
    let err = lazo::or(&x, &c).unwrap_err();
    assert_eq!(err.code(), "ENCODE_DOMAIN_MISMATCH");
}

#[test]
fn summary_after_solve() {
    let x = Variable::binary("sx");
    let y = Variable::binary("sy");
    let z = lazo::and(&x, &y).unwrap();
    let mut problem = Problem::new(None, Sense::Minimize);
    problem.set_objective(-&z).unwrap();
    lazo::solve(&mut problem, &SolverConfig::new().with_time_limit(10.0)).unwrap();

    let summary = problem.summary();
    assert_eq!(summary.num_constraints, 3);
    assert_eq!(summary.num_variables, 3);
    let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
    assert_eq!(json["sense"], "Minimize");
    assert!(problem.show().contains("#constraints : 3"));
}
