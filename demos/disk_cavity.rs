use fdtd_setup::prelude::*;

fn main() {
    let disk_radius = 800e-9; // [m]
    let dx = 10e-9; // [m / cell]

    // leave one cell of metal around the disk
    let side = 2.0 * disk_radius + 2.0 * dx;

    // a circular cavity in perfectly conducting metal
    let mut experiment = Experiment::new(ExperimentDescriptor {
        width: side,
        height: side,
        dx,
        base_material: Some(Material::perfect_conductor()),
    })
    .unwrap();

    let center = side / 2.0;
    let core = experiment.add_material(Material::new(11.56, 1.0));
    let cladding = experiment.add_material(Material::vacuum());
    experiment.draw_circle(center, center, disk_radius, cladding).unwrap();
    experiment.draw_circle(center, center, 0.5 * disk_radius, core).unwrap();

    // the default source sits at the center; detune it slightly
    experiment.sources[0].frequency = 125e12;

    let sim_params = experiment.simulation_parameters();
    println!(
        "\n-- General Experiment Info --\n\
        # of cells:      {} x {}\n\
        # of materials:  {}\n\
        Δx:              {:<9.2e} m\n\
        Δt:              {:<9.2e} s\n\
        # of timesteps:  {}\n",
        experiment.n_columns(),
        experiment.n_rows(),
        experiment.materials().len(),
        sim_params.delta_x,
        sim_params.delta_t,
        experiment.n_timesteps(),
    );

    save(&experiment, &SaveSettings {
        filename: "experiment.json",
        save_type: SaveType::Json,
        overwrite: true,
    })
    .unwrap();
}
