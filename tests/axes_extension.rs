use gwplot::{
    Array2D, Aspect, Axes, AxesBackend, AxisScale, ColorArg, ColorbarOptions, Figure, FigureKind,
    FigureRect, GpsScale, GpsUnit, ImageOptions, ImageSource, Interpolation, LegendOptions,
    LineOptions, MeshArgs, MeshOptions, Origin, PlotArg, PlotError, RecordingRenderer, RenderList,
    Renderer, ScatterOptions, ScreenRect, Series, XLim, plot_args,
};
use ndarray::{Array2, array};

const GW150914: f64 = 1126259462.0;

fn gps_axes() -> Axes {
    let mut axes = Axes::default();
    axes.set_xscale(AxisScale::Gps(GpsScale::auto()));
    axes
}

/// Captures every text it is handed, then fails.
#[derive(Default)]
struct FailingRenderer {
    texts: Vec<String>,
}

impl Renderer for FailingRenderer {
    fn bounds(&self) -> ScreenRect {
        ScreenRect::from_size(0.0, 0.0, 640.0, 480.0)
    }

    fn render(&mut self, list: &RenderList) -> gwplot::Result<()> {
        self.texts.extend(list.texts().map(str::to_owned));
        Err(PlotError::Render("device lost".to_owned()))
    }
}

#[test]
fn gps_label_restored_after_failed_draw() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut axes = gps_axes();
    axes.set_xlim(XLim::new(GW150914, GW150914 + 3600.0)).unwrap();
    let mut renderer = FailingRenderer::default();

    let result = axes.draw(&mut renderer);

    assert_eq!(result, Err(PlotError::Render("device lost".to_owned())));
    assert!(
        renderer
            .texts
            .iter()
            .any(|text| text == "Time [minutes] from 2015-09-14 09:50:45 UTC (1126259462.0)")
    );
    assert_eq!(axes.xaxis().label_text(), "");
    assert!(axes.xaxis().is_default_label());
}

#[test]
fn both_gps_axes_are_labelled() {
    let mut axes = gps_axes();
    axes.set_yscale(AxisScale::Gps(GpsScale::with_unit(GpsUnit::Hours)));
    axes.set_xlim(XLim::new(GW150914, GW150914 + 10.0)).unwrap();
    axes.set_ylim(XLim::new(GW150914 + 0.5, GW150914 + 7200.0)).unwrap();
    let mut renderer = RecordingRenderer::default();
    axes.draw(&mut renderer).unwrap();
    let texts: Vec<&str> = renderer.texts().collect();
    assert!(texts.contains(&"Time [seconds] from 2015-09-14 09:50:45 UTC (1126259462.0)"));
    assert!(texts.contains(&"Time [hours] from 2015-09-14 09:50:45 UTC (1126259462.0)"));
    assert!(axes.yaxis().is_default_label());
}

#[test]
fn date_string_and_gps_number_give_same_limits() {
    let mut by_date = gps_axes();
    let mut by_number = gps_axes();
    let from_date = by_date
        .set_xlim(("2015-09-14 09:50:45", "2015-09-14 09:51:45").into())
        .unwrap();
    let from_number = by_number
        .set_xlim(XLim::new(GW150914, GW150914 + 60.0))
        .unwrap();
    assert_eq!(from_date, from_number);
    assert_eq!(by_date.get_xlim(), (GW150914, GW150914 + 60.0));
}

#[test]
fn unparseable_limits_reach_the_base() {
    let mut axes = gps_axes();
    assert!(matches!(
        axes.set_xlim(XLim::left("not a time")),
        Err(PlotError::InvalidLimit { .. })
    ));
    let mut linear = Axes::default();
    assert!(matches!(
        linear.set_xlim(XLim::new("2015-09-14", 1.0)),
        Err(PlotError::InvalidLimit { .. })
    ));
}

#[test]
fn scatter_sorts_by_color() {
    let mut axes = Axes::default();
    let id = axes
        .scatter(
            &[1.0, 2.0, 3.0],
            &[10.0, 20.0, 30.0],
            ScatterOptions::default().c(vec![3.0, 1.0, 2.0]),
        )
        .unwrap();
    let scatter = axes.artist(id).and_then(|a| a.as_scatter()).unwrap();
    assert_eq!(scatter.x(), &[2.0, 3.0, 1.0]);
    assert_eq!(scatter.y(), &[20.0, 30.0, 10.0]);
    assert_eq!(scatter.color_values(), Some(&[1.0, 2.0, 3.0][..]));
}

#[test]
fn scatter_keeps_order_without_c_sort() {
    let mut axes = Axes::default();
    let id = axes
        .scatter(
            &[1.0, 2.0, 3.0],
            &[10.0, 20.0, 30.0],
            ScatterOptions::default()
                .c(vec![3.0, 1.0, 2.0])
                .c_sort(false),
        )
        .unwrap();
    let scatter = axes.artist(id).and_then(|a| a.as_scatter()).unwrap();
    assert_eq!(scatter.x(), &[1.0, 2.0, 3.0]);
    assert_eq!(scatter.color_values(), Some(&[3.0, 1.0, 2.0][..]));
}

#[test]
fn scatter_numeric_specs_sort_and_literal_specs_do_not() {
    let mut axes = Axes::default();
    let numeric = axes
        .scatter(
            &[1.0, 2.0],
            &[1.0, 2.0],
            ScatterOptions::default().c(ColorArg::Specs(vec!["5".into(), "-1".into()])),
        )
        .unwrap();
    let scatter = axes.artist(numeric).and_then(|a| a.as_scatter()).unwrap();
    assert_eq!(scatter.x(), &[2.0, 1.0]);

    let literal = axes
        .scatter(
            &[1.0, 2.0],
            &[1.0, 2.0],
            ScatterOptions::default().c(ColorArg::Specs(vec!["red".into(), "b".into()])),
        )
        .unwrap();
    let scatter = axes.artist(literal).and_then(|a| a.as_scatter()).unwrap();
    assert_eq!(scatter.x(), &[1.0, 2.0]);
    assert_eq!(scatter.color_values(), None);
}

#[test]
fn imshow_array2d_on_log_axis() {
    let mut axes = Axes::default();
    axes.set_xscale(AxisScale::Log10);
    let array = Array2D::regular("spec", Array2::zeros((4, 3)), (0.0, 1.0), (10.0, 2.0));
    let id = axes
        .imshow(ImageSource::Array(array), ImageOptions::default())
        .unwrap();
    let image = axes.artist(id).and_then(|a| a.as_image()).unwrap();
    assert_eq!(image.extent(), [1e-300, 4.0, 10.0, 16.0]);
    assert_eq!(image.origin(), Origin::Lower);
    assert_eq!(image.interpolation(), Interpolation::None);
    assert_eq!(image.aspect(), Aspect::Auto);
    assert_eq!(image.data().dim(), (3, 4));
}

#[test]
fn imshow_array2d_on_log_y_axis() {
    let mut axes = Axes::default();
    axes.set_yscale(AxisScale::Log10);
    let array = Array2D::regular("spec", Array2::zeros((2, 3)), (5.0, 1.0), (0.0, 2.0));
    let id = axes
        .imshow(ImageSource::Array(array), ImageOptions::default())
        .unwrap();
    let image = axes.artist(id).and_then(|a| a.as_image()).unwrap();
    assert_eq!(image.extent(), [5.0, 7.0, 1e-300, 6.0]);
}

#[test]
fn imshow_array2d_keeps_caller_options() {
    let mut axes = Axes::default();
    let array = Array2D::regular("spec", Array2::zeros((2, 2)), (0.0, 1.0), (0.0, 1.0));
    let options = ImageOptions {
        extent: Some([5.0, 6.0, 7.0, 8.0]),
        origin: Some(Origin::Upper),
        ..ImageOptions::default()
    };
    let id = axes.imshow(ImageSource::Array(array), options).unwrap();
    let image = axes.artist(id).and_then(|a| a.as_image()).unwrap();
    assert_eq!(image.extent(), [5.0, 6.0, 7.0, 8.0]);
    assert_eq!(image.origin(), Origin::Upper);
    assert_eq!(axes.get_xlim(), (5.0, 6.0));
}

#[test]
fn pcolormesh_array2d_uses_span_edges() {
    let mut axes = Axes::default();
    let array = Array2D::new(
        "spec",
        array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]],
        vec![0.0, 0.5, 1.0],
        vec![100.0, 200.0],
    )
    .unwrap();
    let id = axes
        .pcolormesh(MeshArgs::Array(array), MeshOptions::default())
        .unwrap();
    let mesh = axes.artist(id).and_then(|a| a.as_mesh()).unwrap();
    assert_eq!(mesh.c(), &array![[1.0, 3.0, 5.0], [2.0, 4.0, 6.0]]);
    assert_eq!(mesh.x().row(0).to_vec(), vec![0.0, 0.5, 1.0, 1.5]);
    assert_eq!(mesh.y().column(0).to_vec(), vec![100.0, 200.0, 300.0]);
}

#[test]
fn plot_mmm_returns_artists_in_order() {
    let mut axes = Axes::default();
    let data = Series::regular("mean", 0.0, 1.0, vec![1.0, 2.0, 3.0]);
    let lower = Series::regular("min", 0.0, 1.0, vec![0.5, 1.5, 2.5]);
    let upper = Series::regular("max", 0.0, 1.0, vec![1.5, 2.5, 3.5]);
    let ids = axes
        .plot_mmm(
            &data,
            Some(&lower),
            Some(&upper),
            LineOptions::default().linewidth(2.0).label("range"),
        )
        .unwrap();
    assert_eq!(ids.len(), 4);

    let primary = axes.artist(ids[0]).and_then(|a| a.as_line()).unwrap();
    let color = primary.color();
    assert_eq!(primary.alpha(), None);
    assert_eq!(primary.label(), "range");
    for id in &ids[1..3] {
        let bound = axes.artist(*id).and_then(|a| a.as_line()).unwrap();
        assert_eq!(bound.label(), "");
        assert_eq!(bound.linewidth(), 1.0);
        assert_eq!(bound.color(), color);
        assert_eq!(bound.alpha(), Some(0.2));
    }
    let fill = axes.artist(ids[3]).and_then(|a| a.as_fill()).unwrap();
    assert_eq!(fill.y1(), &[0.5, 1.5, 2.5]);
    assert_eq!(fill.y2(), &[1.5, 2.5, 3.5]);
    assert_eq!(fill.alpha(), Some(0.1));
    assert_eq!(fill.color(), color);
    assert!(fill.is_rasterized());
}

#[test]
fn plot_mmm_with_lower_only() {
    let mut axes = Axes::default();
    let data = Series::regular("mean", 0.0, 1.0, vec![1.0, 2.0]);
    let lower = Series::regular("min", 0.0, 1.0, vec![0.0, 1.0]);
    let ids = axes
        .plot_mmm(&data, Some(&lower), None, LineOptions::default().alpha(0.3))
        .unwrap();
    assert_eq!(ids.len(), 3);
    let fill = axes.artist(ids[2]).and_then(|a| a.as_fill()).unwrap();
    assert_eq!(fill.y1(), &[0.0, 1.0]);
    assert_eq!(fill.y2(), &[1.0, 2.0]);
    assert_eq!(fill.alpha(), Some(0.3));
}

#[test]
fn legend_defaults_and_overrides() {
    let mut axes = Axes::default();
    assert!(axes.legend(LegendOptions::default()).is_none());

    axes.plot(plot_args![vec![0.0, 1.0]], LineOptions::default().label("a"))
        .unwrap();
    axes.plot(plot_args![vec![1.0, 0.0], "r--"], LineOptions::default().label("b"))
        .unwrap();

    let legend = axes.legend(LegendOptions::default()).unwrap();
    assert_eq!(legend.frame().alpha, 0.8);
    assert_eq!(legend.frame().linewidth, gwplot::rc_params().axes_linewidth);
    assert_eq!(legend.lines().count(), 2);
    assert!(legend.lines().all(|line| line.width == 8.0));

    let legend = axes
        .legend(LegendOptions::default().alpha(0.5).linewidth(2.0))
        .unwrap();
    assert_eq!(legend.frame().alpha, 0.5);
    assert!(legend.lines().all(|line| line.width == 2.0));
}

#[test]
fn series_plots_like_index_and_values() {
    let series = Series::new("h1", vec![10.0, 11.0, 13.0], vec![1.0, 4.0, 9.0]).unwrap();
    let mut from_series = Axes::default();
    let mut from_arrays = Axes::default();
    let a = from_series
        .plot(vec![PlotArg::from(&series)], LineOptions::default())
        .unwrap();
    let b = from_arrays
        .plot(
            plot_args![vec![10.0, 11.0, 13.0], vec![1.0, 4.0, 9.0]],
            LineOptions::default(),
        )
        .unwrap();
    let a = from_series.artist(a[0]).and_then(|a| a.as_line()).unwrap();
    let b = from_arrays.artist(b[0]).and_then(|a| a.as_line()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn colorbar_needs_a_mappable() {
    let mut axes = Axes::default();
    assert_eq!(
        axes.colorbar(ColorbarOptions::default()).err(),
        Some(PlotError::NoMappable)
    );
    let line = axes
        .plot(plot_args![vec![0.0, 1.0]], LineOptions::default())
        .unwrap();
    assert_eq!(
        axes.colorbar(ColorbarOptions {
            mappable: Some(line[0]),
            ..ColorbarOptions::default()
        })
        .err(),
        Some(PlotError::NotMappable(0))
    );
}

#[test]
fn colorbar_defaults_to_divider_slot() {
    let rc = gwplot::rc_params();
    let parent = FigureRect::new(0.1, 0.1, 0.8, 0.8);
    let mut axes = Axes::at(parent);
    let mesh = axes
        .pcolormesh(MeshArgs::C(array![[1.0, 2.0], [3.0, 4.0]]), MeshOptions::default())
        .unwrap();
    let colorbar = axes.colorbar(ColorbarOptions::default()).unwrap();
    assert_eq!(colorbar.mappable(), mesh);
    assert!(colorbar.use_axesgrid());
    assert_eq!(colorbar.fraction(), 0.0);
    let expected = 0.8 * rc.colorbar_axesgrid_size;
    assert!((colorbar.rect().width - expected).abs() < 1e-6);
    let shrunk = axes.position().width;
    assert!(
        (shrunk - (0.8 - expected - 0.8 * rc.colorbar_axesgrid_pad)).abs() < 1e-6
    );
}

#[test]
fn colorbar_steals_space_when_asked() {
    let rc = gwplot::rc_params();
    let mut axes = Axes::at(FigureRect::new(0.0, 0.0, 1.0, 1.0));
    axes.imshow(ImageSource::Grid(array![[1.0, 2.0]]), ImageOptions::default())
        .unwrap();
    let colorbar = axes
        .colorbar(ColorbarOptions {
            use_axesgrid: Some(false),
            label: Some("ASD".to_owned()),
            ..ColorbarOptions::default()
        })
        .unwrap();
    assert!(!colorbar.use_axesgrid());
    assert_eq!(colorbar.fraction(), rc.colorbar_fraction);
    assert_eq!(colorbar.label(), Some("ASD"));
    assert!((colorbar.rect().width - rc.colorbar_fraction).abs() < 1e-6);
}

#[test]
fn colorbar_fraction_alone_steals_space() {
    let mut axes = Axes::at(FigureRect::new(0.0, 0.0, 1.0, 1.0));
    axes.pcolormesh(MeshArgs::C(Array2::ones((2, 2))), MeshOptions::default())
        .unwrap();
    let colorbar = axes
        .colorbar(ColorbarOptions {
            fraction: Some(0.2),
            ..ColorbarOptions::default()
        })
        .unwrap();
    assert!(!colorbar.use_axesgrid());
    assert_eq!(colorbar.fraction(), 0.2);
    assert!((colorbar.rect().width - 0.2).abs() < 1e-6);
}

#[test]
fn colorbar_on_plot_figure_never_records_axesgrid() {
    let mut figure = Figure::new(FigureKind::Plot);
    let axes = figure.add_subplot("rectilinear").unwrap();
    axes.pcolormesh(MeshArgs::C(Array2::ones((2, 2))), MeshOptions::default())
        .unwrap();
    let colorbar = axes.colorbar(ColorbarOptions::default()).unwrap();
    assert!(!colorbar.use_axesgrid());
    assert_eq!(axes.colorbars().len(), 1);
}

#[test]
fn scatter_with_mapped_colors_is_mappable() {
    let mut axes = Axes::default();
    let id = axes
        .scatter(
            &[1.0, 2.0],
            &[1.0, 2.0],
            ScatterOptions::default().c(vec![0.0, 1.0]),
        )
        .unwrap();
    axes.scatter(&[1.0], &[1.0], ScatterOptions::default().c("k"))
        .unwrap();
    assert_eq!(axes.colorbar(ColorbarOptions::default()).unwrap().mappable(), id);
}
