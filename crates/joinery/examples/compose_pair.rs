//! Example: Composing a design built in code
//!
//! This example builds a small kit and a design directly from the model
//! types, composes it, and prints where every piece ended up.

use joinery::{
    Composer,
    catalogue::Catalogue,
    geometry::{Plane, Point, Vector},
    model::{Connection, Design, Piece, Port, Side, Type, TypeKey},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Composing a post and beam...\n");

    // A post with a port on its top face, and a beam with a port on each end
    let post = Type::new("post", "")
        .with_port(Port::new("top", Point::new(0.0, 0.0, 2.5), Vector::z_axis()));
    let beam = Type::new("beam", "")
        .with_port(Port::new("left", Point::new(-1.5, 0.0, 0.0), Vector::x_axis().reverse()))
        .with_port(Port::new("right", Point::new(1.5, 0.0, 0.0), Vector::x_axis()));
    let catalogue = Catalogue::new().with_type(post).with_type(beam);

    // The post is fixed in the world; the beam hangs off the post's top port
    let design = Design::new("gallows")
        .with_piece(Piece::of_type("post", TypeKey::new("post", "")).with_plane(Plane::world_xy()))
        .with_piece(Piece::of_type("beam", TypeKey::new("beam", "")))
        .with_connection(
            Connection::new(Side::new("post", "top"), Side::new("beam", "left"))
                .with_rotation(90.0)
                .with_offset(1.0, 0.0),
        );

    let composer = Composer::default();
    let composed = composer.compose(&design, &catalogue)?;

    for piece in composed.pieces() {
        let Some(plane) = piece.plane() else {
            println!("{:>6}: not placed", piece.id().to_string());
            continue;
        };
        let origin = plane.origin();
        println!(
            "{:>6}: origin ({:.3}, {:.3}, {:.3})",
            piece.id().to_string(),
            origin.x(),
            origin.y(),
            origin.z()
        );
    }

    let flat = composer.flatten(&design, &catalogue)?;
    println!("\n{}", serde_json::to_string_pretty(&flat)?);

    Ok(())
}
