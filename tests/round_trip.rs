use fdtd_setup::document::{self, Document};
use fdtd_setup::prelude::*;

/// A disk cavity in metal with a dielectric core and two detuned sources.
fn cavity() -> Experiment {
    let mut experiment = Experiment::new(ExperimentDescriptor {
        width: 2e-6,
        height: 1.5e-6,
        dx: 50e-9,
        base_material: Some(Material::perfect_conductor()),
    })
    .unwrap();
    experiment.tau = 80e-15;
    experiment.t_detect = 10.0;
    experiment.t_max = 12.5;

    let vacuum = experiment.add_material(Material::vacuum());
    let core = experiment.add_material(Material::new(11.56, 1.0));
    experiment.draw_rectangle(100e-9, 100e-9, 1.8e-6, 1.3e-6, vacuum).unwrap();
    experiment.draw_circle(1e-6, 0.75e-6, 400e-9, core).unwrap();

    experiment.sources[0].frequency = 190e12;
    let mut second = Source::new(12.0, 9.0);
    second.t_start = 1.5;
    second.t_cutoff = f64::INFINITY;
    second.phase = -0.25;
    experiment.add_source(second);
    experiment
}

fn assert_same(a: &Experiment, b: &Experiment) {
    assert_eq!(a.tau, b.tau);
    assert_eq!(a.t_detect, b.t_detect);
    assert_eq!(a.t_max, b.t_max);
    assert_eq!(a.dx(), b.dx());
    assert_eq!(a.sources, b.sources);
    assert_eq!(a.materials(), b.materials());
    assert_eq!(a.n_columns(), b.n_columns());
    assert_eq!(a.n_rows(), b.n_rows());
    assert_eq!(a.field().view(), b.field().view());
}

#[test]
fn document_round_trip() {
    let experiment = cavity();
    let imported = document::import(document::export(&experiment)).unwrap();
    assert_same(&experiment, &imported);
    assert_eq!(experiment, imported);
}

#[test]
fn json_round_trip_keeps_infinities() {
    let experiment = cavity();
    let json = document::export(&experiment).to_json_string().unwrap();
    let imported = document::import(Document::from_json_str(&json).unwrap()).unwrap();

    assert_same(&experiment, &imported);
    assert_eq!(imported.materials().base().relative_permeability(), f64::INFINITY);
    assert_eq!(imported.sources[1].t_cutoff, f64::INFINITY);
}

#[test]
fn small_square_round_trip() {
    let mut experiment = Experiment::new(ExperimentDescriptor {
        width: 10.0,
        height: 10.0,
        dx: 1.0,
        base_material: Some(Material::vacuum()),
    })
    .unwrap();
    let metal = experiment.add_material(Material::perfect_conductor());
    experiment.draw_circle(5.0, 5.0, 2.0, metal).unwrap();

    let json = document::export(&experiment).to_json_string_pretty().unwrap();
    let imported: Experiment = Document::from_json_str(&json)
        .and_then(Experiment::try_from)
        .unwrap();
    assert_eq!(imported.field(), experiment.field());
    assert_eq!(imported.field().count(metal), 13);
}

#[test]
fn reads_hand_written_documents() {
    let json = r#"{
        "tau": 1e-13, "t_detect": 14, "t_max": 15, "dx": 0.5,
        "sources": [{"x": 1, "y": 1, "t_start": 0, "t_cutoff": 7,
                     "frequency": 1.2e14, "phase": 3}],
        "materials": [
            {"relative_permeability": 1, "relative_permittivity": 1},
            {"relative_permeability": "Infinity", "relative_permittivity": "Infinity"}
        ],
        "field": [[0, 1, 0], [1, 1, 1]]
    }"#;
    let experiment = document::import(Document::from_json_str(json).unwrap()).unwrap();

    assert_eq!(experiment.n_columns(), 2);
    assert_eq!(experiment.n_rows(), 3);
    assert_eq!(experiment.dx(), 0.5);
    assert_eq!(experiment.sources, vec![Source::new(1.0, 1.0)]);
    assert!(experiment.materials().get(1).unwrap().is_perfect_conductor());
    assert_eq!(experiment.field().get(0, 1), Some(1));
    assert_eq!(experiment.field().count(1), 4);
}

#[test]
fn reads_python_json_dump_output() {
    // Written by `json.dump`, which emits bare `Infinity` and `NaN` tokens.
    let json = r#"{"tau": 1e-13, "t_detect": 14.0, "t_max": 15.0, "dx": 1.0, "sources": [{"x": 5.0, "y": 5.0, "t_start": 0.0, "t_cutoff": 7.0, "frequency": 120000000000000.0, "phase": 3.0}], "materials": [{"relative_permeability": 1.0, "relative_permittivity": 1.0}, {"relative_permeability": Infinity, "relative_permittivity": Infinity}, {"relative_permeability": -Infinity, "relative_permittivity": NaN}], "field": [[0, 1], [1, 2]]}"#;
    let experiment = document::import(Document::from_json_str(json).unwrap()).unwrap();

    assert_eq!(experiment.n_columns(), 2);
    assert_eq!(experiment.n_rows(), 2);
    assert_eq!(experiment.sources, vec![Source::new(5.0, 5.0)]);
    assert_eq!(
        experiment.materials().get(1),
        Some(&Material::perfect_conductor())
    );
    let odd = experiment.materials().get(2).unwrap();
    assert_eq!(odd.relative_permeability(), f64::NEG_INFINITY);
    assert!(odd.relative_permittivity().is_nan());
    assert_eq!(experiment.field().get(1, 1), Some(2));
}

#[test]
fn rejects_cells_without_material() {
    let json = r#"{
        "tau": 1e-13, "t_detect": 14, "t_max": 15, "dx": 1,
        "sources": [],
        "materials": [{"relative_permeability": 1, "relative_permittivity": 1}],
        "field": [[0, 0], [0, 1]]
    }"#;
    let result = document::import(Document::from_json_str(json).unwrap());
    assert!(matches!(result, Err(Error::MalformedDocument(_))));
}

#[test]
fn save_and_load_every_format() {
    let experiment = cavity();
    let dir = tempfile::tempdir().unwrap();

    for (name, save_type) in [
        ("experiment.json", SaveType::Json),
        ("pretty.json", SaveType::PrettyJson),
        ("experiment.h5", SaveType::H5),
    ] {
        let filename = dir.path().join(name);
        save(&experiment, &SaveSettings {
            filename: &filename,
            save_type,
            overwrite: false,
        })
        .unwrap();
        let loaded = load(&filename).unwrap();
        assert_same(&experiment, &loaded);
    }
}

#[test]
fn save_respects_overwrite() {
    let dir = tempfile::tempdir().unwrap();

    for (name, save_type) in [("experiment.json", SaveType::Json), ("experiment.h5", SaveType::H5)] {
        let mut experiment = cavity();
        let filename = dir.path().join(name);
        let settings = |overwrite| SaveSettings {
            filename: filename.clone(),
            save_type,
            overwrite,
        };

        save(&experiment, &settings(false)).unwrap();
        experiment.t_max = 20.0;
        assert!(matches!(
            save(&experiment, &settings(false)),
            Err(Error::FileExists { .. })
        ));
        assert_eq!(load(&filename).unwrap().t_max, 12.5);

        save(&experiment, &settings(true)).unwrap();
        assert_eq!(load(&filename).unwrap().t_max, 20.0);
    }
}

#[test]
fn load_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load(dir.path().join("missing.json")),
        Err(Error::Io(_))
    ));
}
