use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};
use ndarray::Array2;

use gwplot::gpui_backend::FigureView;
use gwplot::{
    Array2D, AxesBackend, AxisScale, ColorbarOptions, Figure, FigureKind, FigureRect, GpsScale,
    LegendOptions, LineOptions, MeshArgs, MeshOptions, NormOptions, Series, Theme,
};

const START: f64 = 1_126_259_446.0;

fn main() {
    env_logger::init();
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(900.0), px(720.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            let figure = match build_figure() {
                Ok(figure) => figure,
                Err(err) => {
                    log::error!("failed to build figure: {err}");
                    Figure::new(FigureKind::Plot)
                }
            };
            cx.new(|_| FigureView::new(figure))
        })
        .unwrap();
    });
}

fn build_figure() -> gwplot::Result<Figure> {
    let mut figure = Figure::builder()
        .kind(FigureKind::Plot)
        .theme(Theme::light())
        .build();

    // Range trend with min/max envelope.
    let mean: Vec<f64> = (0..320)
        .map(|i| 120.0 + 8.0 * (i as f64 * 0.05).sin())
        .collect();
    let data = Series::regular("range", START, 0.1, mean.clone());
    let lower = Series::regular("min", START, 0.1, mean.iter().map(|v| v - 6.0).collect());
    let upper = Series::regular("max", START, 0.1, mean.iter().map(|v| v + 6.0).collect());

    let trend = figure.add_axes("rectilinear", FigureRect::new(0.1, 0.56, 0.8, 0.36))?;
    trend.set_xscale(AxisScale::Gps(GpsScale::auto()));
    trend.plot_mmm(&data, Some(&lower), Some(&upper), LineOptions::default().label("BNS range"))?;
    trend.set_xlim((START, "2015-09-14 09:51:02").into())?;
    trend.set_ylabel("Range [Mpc]");
    trend.legend(LegendOptions::default());

    // Spectrogram with a log colorbar.
    let values = Array2::from_shape_fn((64, 48), |(t, f)| {
        let tone = (-((f as f64 - 20.0 - t as f64 * 0.2).powi(2)) / 8.0).exp();
        1e-3 + tone
    });
    let spectrogram = Array2D::regular("spectrogram", values, (START, 0.5), (0.0, 8.0));
    let image = figure.add_axes("rectilinear", FigureRect::new(0.1, 0.08, 0.8, 0.36))?;
    image.set_xscale(AxisScale::Gps(GpsScale::auto()));
    image.pcolormesh(
        MeshArgs::Array(spectrogram),
        MeshOptions {
            norm: NormOptions::log(),
            ..MeshOptions::default()
        },
    )?;
    image.set_ylabel("Frequency [Hz]");
    image.colorbar(ColorbarOptions {
        label: Some("Normalized energy".to_owned()),
        ..ColorbarOptions::default()
    })?;
    Ok(figure)
}
