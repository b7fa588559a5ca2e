use gwplot::{
    Axes, AxesBackend, AxisScale, Figure, FigureKind, FigureRect, GpsScale, GpsUnit, LigoTimeGps,
    LineOptions, PlotError, RecordingRenderer, Series, Theme, XLim, plot_args, projection,
    register_projection, to_gps,
};

#[test]
fn registered_projection_is_used_by_figures() {
    register_projection("gps-hours", |rect: FigureRect| {
        let mut axes = Axes::at(rect);
        axes.set_xscale(AxisScale::Gps(GpsScale::with_unit(GpsUnit::Hours)));
        axes
    });
    let mut figure = Figure::new(FigureKind::Plot);
    let axes = figure.add_subplot("gps-hours").unwrap();
    assert_eq!(axes.get_xscale().name(), "hours");
    assert!(projection("gps-hours").is_ok());
}

#[test]
fn figure_draws_relabelled_gps_axes() {
    let mut figure = Figure::builder().theme(Theme::dark()).build();
    let axes = figure.add_subplot("rectilinear").unwrap();
    axes.set_xscale(AxisScale::Gps(GpsScale::auto()));
    let series = Series::regular("strain", 1126259462.0, 0.25, vec![0.0, 1.0, 0.0, -1.0]);
    axes.plot(plot_args![&series], LineOptions::default().label("H1"))
        .unwrap();
    axes.set_xlim(XLim::new(1126259462.0, 1126259463.0)).unwrap();

    let mut renderer = RecordingRenderer::default();
    figure.draw(&mut renderer).unwrap();

    assert!(renderer.texts().any(|text| {
        text == "Time [milliseconds] from 2015-09-14 09:50:45 UTC (1126259462.0)"
    }));
    let axes = figure.axes(0).unwrap();
    assert_eq!(axes.xaxis().label_text(), "");
    assert!(matches!(figure.axes(1), Err(PlotError::NoSuchAxes(1))));
}

#[test]
fn epoch_accepts_any_gps_input() {
    let mut axes = Axes::default();
    axes.set_xscale(AxisScale::Gps(GpsScale::auto()));
    axes.set_xlim(XLim::new(1126259400.0, 1126259500.0)).unwrap();
    assert_eq!(axes.get_epoch().unwrap(), 1126259400.0);

    axes.set_epoch(LigoTimeGps::new(1126259462, 500_000_000))
        .unwrap();
    assert_eq!(axes.get_epoch().unwrap(), 1126259462.5);

    let expected = to_gps("Sep 14 2015 09:50:45").unwrap().as_f64();
    axes.set_epoch("Sep 14 2015 09:50:45").unwrap();
    assert_eq!(axes.get_epoch().unwrap(), expected);
    assert!(axes.set_epoch("not a date").is_err());
}

#[test]
fn coordinate_readout_switches_with_scale() {
    let mut axes = Axes::default();
    assert_eq!(axes.fmt_xdata(1126259462.25), None);
    axes.set_xscale(AxisScale::Gps(GpsScale::auto()));
    assert_eq!(
        axes.fmt_xdata(1126259462.25).as_deref(),
        Some("1126259462.25")
    );
    axes.set_yscale(AxisScale::Gps(GpsScale::with_unit(GpsUnit::Seconds)));
    assert_eq!(axes.format_ydata(-0.5), "-0.5");
}
