//! Support points of a mitered post.
//!
//! ```text
//! cargo run --example miter
//! RUST_LOG=timber_csg=trace cargo run --example miter
//! ```

use timber_csg::csg::{Cylinder, Difference, HalfSpace, Prism, Shape, Solid, Union};
use timber_csg::math::{point3, to_f64_point, vector2, vector3, Vector3};
use timber_csg::{Real, Result};

fn report(label: &str, shape: &Shape, direction: &Vector3) {
    match shape.support_point(direction) {
        Ok(point) => {
            let approx = to_f64_point(&point);
            println!(
                "{label:>12}: ({}, {}, {})  ~ ({:.4}, {:.4}, {:.4})",
                point.x, point.y, point.z, approx.x, approx.y, approx.z
            );
        }
        Err(err) => println!("{label:>12}: {err}"),
    }
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for this crate.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("timber_csg=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 4x6 post standing 120 units tall, mitered at 45 degrees across its top.
    let post: Shape = Prism::new(
        vector2(4, 6),
        vector3(0, 0, 1),
        Some(Real::from(0)),
        Some(Real::from(120)),
    )?
    .into();
    let miter: Shape = HalfSpace::new(vector3(1, 0, 1), Real::from(118))?.into();
    let peg_hole: Shape = Cylinder::new(vector3(0, 1, 0), Real::ratio(1, 2)?, None, None)?.into();
    let mitered = Shape::from(Difference::new(post.clone(), vec![miter, peg_hole]));

    println!("{mitered}");
    for (label, direction) in [
        ("up", vector3(0, 0, 1)),
        ("down", vector3(0, 0, -1)),
        ("diagonal", vector3(1, 1, 1)),
        ("miter face", vector3(-1, 0, -1)),
    ] {
        report(label, &mitered, &direction);
    }

    let top = point3(0, 0, 120);
    println!(
        "top center inside stock: {}, inside mitered post: {}",
        post.contains_point(&top),
        mitered.contains_point(&top)
    );

    // A brace on a bare half-space: the half-space is skipped, the brace answers.
    let brace: Shape = Cylinder::new(
        vector3(1, 0, 1),
        Real::from(2),
        Some(Real::from(0)),
        Some(Real::from(40)),
    )?
    .into();
    let floor: Shape = HalfSpace::through_origin(vector3(0, 0, 1))?.into();
    let assembly = Shape::from(Union::new(vec![floor, brace]));
    println!("{assembly}");
    report("sideways", &assembly, &vector3(1, 0, 0));

    Ok(())
}
