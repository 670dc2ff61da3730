//! gridmedian: generate a random maze, find the cell closest in total to
//! every target, and print the annotated result.

use gridmedian_core::CellTag;
use gridmedian_maze::{MazeConfig, MazeSolver};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    solve_2d()?;
    println!();
    solve_3d()?;
    Ok(())
}

fn solve_2d() -> Result<(), Box<dyn std::error::Error>> {
    let config = MazeConfig::<2>::default();
    let grid = config.generate()?;
    info!(
        "2-D maze {} with {} targets",
        grid.extents(),
        grid.count(CellTag::Target)
    );

    let mut solver = MazeSolver::new(grid);
    let best = solver.find_optimal_point();
    let Some(cell) = best.cell else {
        println!("No cell reaches every target.");
        println!("{}", solver.grid());
        return Ok(());
    };

    println!("Best cell: {cell} with sum of distances = {}", best.total);
    solver.mark(cell, 'X');
    solver.mark_paths(cell, '.');
    println!("{}", solver.grid());
    Ok(())
}

fn solve_3d() -> Result<(), Box<dyn std::error::Error>> {
    let config = MazeConfig::<3>::default();
    let grid = config.generate()?;

    println!(
        "Empty cells fraction: {:.2}%",
        grid.fraction(CellTag::Empty) * 100.0
    );
    println!(
        "Wall cells fraction: {:.2}%",
        grid.fraction(CellTag::Wall) * 100.0
    );

    let mut solver = MazeSolver::new(grid);
    let best = solver.find_optimal_point();
    match best.cell {
        Some(cell) => println!("Best 3-D cell: {cell} with sum of distances = {}", best.total),
        None => println!("No 3-D cell reaches every target."),
    }
    Ok(())
}
