use isocut::{CutConfig, CutObserver, FaceAdvector, FaceCutter, MeshTopology, PolyMesh, Side};
use isocut_viz::{regular_face, status_color, OrbitCamera, RenderObserver, Sweep};
use macroquad::prelude::*;
use nalgebra::{Point3, Vector3};
use tracing_subscriber::EnvFilter;

const MESH_CELLS: usize = 4;

#[macroquad::main("isocut: swept face cutting")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let hexagon = regular_face(6, Point3::new(-2.5, 0.0, 0.0), 1.0);
    let mesh = match PolyMesh::cartesian(
        [MESH_CELLS, MESH_CELLS, 1],
        Point3::new(0.5, -1.0, 0.0),
        Vector3::new(0.5, 0.5, 0.5),
    ) {
        Ok(mesh) => mesh,
        Err(err) => {
            tracing::error!(%err, "could not build the demo mesh");
            return;
        }
    };
    let alpha = vec![0.0; mesh.n_cells()];
    let advector = match FaceAdvector::new(&mesh, &alpha, CutConfig::default()) {
        Ok(advector) => advector,
        Err(err) => {
            tracing::error!(%err, "could not bind the volume fraction field");
            return;
        }
    };
    let faces: Vec<_> = (0..mesh.n_faces()).map(|f| mesh.face(f)).collect();
    let floor: Vec<usize> = (0..mesh.n_faces())
        .filter(|&f| mesh.face_centre(f).z.abs() < 1e-12)
        .collect();
    tracing::info!(faces = floor.len(), "demo mesh ready");

    let cutter = FaceCutter::default();
    let mut sweep = Sweep::new(Point3::new(-4.0, -1.0, 0.0), Vector3::new(1.0, 0.3, 0.0), 1.0, 9.0);
    let mut camera = OrbitCamera::new(9.0, 0.0, 0.9).with_target(vec3(0.0, 0.0, 0.0));

    loop {
        camera.update();
        sweep.update(get_frame_time() as f64);
        let surface = sweep.surface();

        clear_background(Color::from_rgba(15, 15, 25, 255));
        set_camera(&camera.to_camera3d());

        let mut observer = RenderObserver::new(&faces);
        let floor_faces = floor.iter().copied();
        let cut = advector.cut_faces(floor_faces, &surface, Side::Positive, &mut observer);
        if let Err(err) = cut {
            tracing::warn!(%err, "mesh cut failed");
        }
        let mesh_wet = observer.wet_area();
        let mesh_cut = observer.cut_faces();

        let hex_cut = cutter.cut(&hexagon, &surface, Side::Positive);
        let mut hex_observer = RenderObserver::new(std::slice::from_ref(&hexagon));
        hex_observer.visit(0, &hex_cut);

        let swept = advector.integrator().time_integrated_area_plane(
            &hexagon,
            &sweep.base(),
            &sweep.n0,
            sweep.un0,
            sweep.dt,
            hexagon.mag_area(),
        );

        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), RED);
        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0), GREEN);
        draw_line_3d(vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0), BLUE);

        set_default_camera();

        draw_text(
            &format!(
                "t = {:.2}  un0 = {:+.2}{}",
                sweep.time,
                sweep.un0,
                if sweep.paused { "  (paused)" } else { "" }
            ),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!(
                "hexagon: wet {:.4} of {:.4}  swept over next {:.2}: {:.4}",
                hex_cut.mag_area(),
                hexagon.mag_area(),
                sweep.dt,
                swept
            ),
            10.0,
            45.0,
            18.0,
            status_color(hex_cut.status()),
        );
        draw_text(
            &format!("mesh floor: wet {:.4}, {} faces cut", mesh_wet, mesh_cut),
            10.0,
            65.0,
            18.0,
            GRAY,
        );
        draw_text(
            "Drag to rotate, scroll to zoom | Space pause, F flip, R restart, Left/Right turn",
            10.0,
            90.0,
            16.0,
            DARKGRAY,
        );

        next_frame().await
    }
}
