//! Prints the points and weights of a quadrature rule.
//!
//! Usage: `cargo run --example tabulate -- <legendre|jacobi|triangle> <n> [a] [b]`
use eyre::{eyre, WrapErr};
use jacobi_quadrature::triangle::triangle_collapsed;
use jacobi_quadrature::univariate::{gauss_jacobi, gauss_legendre};
use jacobi_quadrature::{ConvergenceReport, Quadrature};
use std::env;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: Option<T>) -> eyre::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match (args.get(idx), default) {
        (Some(arg), _) => arg
            .parse()
            .wrap_err_with(|| format!("Failed to parse argument {idx} ({arg})")),
        (None, Some(default)) => Ok(default),
        (None, None) => Err(eyre!("Missing argument {idx}")),
    }
}

fn print_report(report: &ConvergenceReport<f64>) {
    println!(
        "# roots: {}, max. Newton iterations: {}, max. residual: {:e}, all converged: {}",
        report.roots().len(),
        report.max_iterations(),
        report.max_residual(),
        report.all_converged()
    );
}

fn main() -> eyre::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let kind: String = parse_arg(&args, 0, Some("legendre".to_string()))?;
    let n: usize = parse_arg(&args, 1, Some(3))?;

    match kind.as_str() {
        "legendre" => {
            let rule = gauss_legendre::<f64>(n)?;
            print_report(rule.report());
            for (w, p) in rule.iter() {
                println!("{:>24.16e} {:>24.16e}", p.x, w);
            }
        }
        "jacobi" => {
            let a: u32 = parse_arg(&args, 2, Some(0))?;
            let b: u32 = parse_arg(&args, 3, Some(0))?;
            let rule = gauss_jacobi::<f64>(n, a, b)?;
            print_report(rule.report());
            for (w, p) in rule.iter() {
                println!("{:>24.16e} {:>24.16e}", p.x, w);
            }
        }
        "triangle" => {
            let rule = triangle_collapsed::<f64>(n)?;
            print_report(rule.report());
            for (w, p) in rule.iter() {
                println!("{:>24.16e} {:>24.16e} {:>24.16e}", p.x, p.y, w);
            }
        }
        other => return Err(eyre!("Unknown rule kind {other}, expected legendre, jacobi or triangle")),
    }

    Ok(())
}
