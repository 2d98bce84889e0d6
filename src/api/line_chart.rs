use std::time::Duration;

use tracing::debug;

use crate::animation::{RevealController, RevealHandle, RevealTick};
use crate::core::{
    ChartArea, ChartType, CurveRequest, DataPoint, StockLine, Viewport, build_curves,
    max_line_length,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartOutput, Color, Renderer};

use super::axis_scene_builder::{AxisKind, AxisSceneContext, build_axis, build_grid};
use super::overlay_builder::{
    PointOverlayContext, RegionOverlayContext, build_areas, build_point_markers, build_regions,
};
use super::series_scene_builder::{SeriesSceneContext, build_series_lines};
use super::{ChartConfig, LineChartOptions, Palette, SceneParts, compose_scene};

/// Line chart bound to a renderer.
///
/// Geometry is rebuilt from the configuration on every render; the only
/// state carried between renders is the reveal controller.
pub struct LineChart<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    chart_type: Box<dyn ChartType>,
    reveal: RevealController,
}

impl<R: Renderer> LineChart<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        validate_size(&config)?;
        Ok(Self {
            renderer,
            config,
            chart_type: Box::new(StockLine::default()),
            reveal: RevealController::default(),
        })
    }

    /// Replaces the curve-fitting strategy (straight, smooth, step, custom).
    #[must_use]
    pub fn with_chart_type(mut self, chart_type: Box<dyn ChartType>) -> Self {
        self.chart_type = chart_type;
        self
    }

    #[must_use]
    pub fn with_reveal(mut self, reveal: RevealController) -> Self {
        self.reveal = reveal;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replaces the whole configuration; new data resets the reveal.
    pub fn set_config(&mut self, config: ChartConfig) -> ChartResult<()> {
        validate_size(&config)?;
        let data_changed = config.data != self.config.data;
        self.config = config;
        if data_changed {
            self.reveal.reset();
        }
        Ok(())
    }

    /// Swaps the data table and snaps the reveal back to fully hidden.
    pub fn set_data(&mut self, data: Option<Vec<DataPoint>>) {
        self.config.data = data;
        self.reveal.reset();
    }

    pub fn set_options(&mut self, options: LineChartOptions) {
        self.config.options = options;
    }

    #[must_use]
    pub fn chart_type(&self) -> &dyn ChartType {
        self.chart_type.as_ref()
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::resolve(
            self.config.palette.as_deref(),
            self.config.options.color.as_ref(),
        )
    }

    /// Color of series `index`; cycles through the palette.
    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        self.palette().color(index)
    }

    /// Builds the scene (or the no-data placeholder) without rendering it.
    pub fn build_output(&mut self) -> ChartResult<ChartOutput> {
        let config = &self.config;
        let Some(data) = config.data.as_deref() else {
            debug!("no data configured; emitting placeholder");
            return Ok(ChartOutput::Placeholder(config.no_data_message().to_owned()));
        };

        let options = &config.options;
        let palette = Palette::resolve(config.palette.as_deref(), options.color.as_ref());
        let (plot_width, plot_height) = config.plot_size();

        let curve_set = build_curves(
            self.chart_type.as_ref(),
            data,
            CurveRequest {
                x_key: &config.x_key,
                y_key: &config.y_key,
                width: plot_width,
                height: plot_height,
                min: options.min,
                max: options.max,
            },
        )?;
        let chart_area = ChartArea::derive(
            &curve_set,
            &config.x_key,
            &config.y_key,
            options.min,
            options.max,
            options.margin,
        );

        if config.animatable {
            let longest = max_line_length(&curve_set.curves)?;
            self.reveal.observe_max_length(longest);
        }

        let axis_ctx = AxisSceneContext {
            chart_area: &chart_area,
            xscale: curve_set.xscale.as_ref(),
            yscale: curve_set.yscale.as_ref(),
        };
        let mut grid = build_grid(&options.axis_x, AxisKind::X, axis_ctx)?;
        grid.extend(build_grid(&options.axis_y, AxisKind::Y, axis_ctx)?);
        let mut axes = build_axis(&options.axis_x, AxisKind::X, axis_ctx)?;
        axes.extend(build_axis(&options.axis_y, AxisKind::Y, axis_ctx)?);

        let regions = build_regions(
            &config.regions,
            RegionOverlayContext {
                chart_area: &chart_area,
                yscale: curve_set.yscale.as_ref(),
                styling: &config.region_styling,
                label_font: &options.label,
            },
        )?;
        let areas = build_areas(&curve_set.curves, &options.show_areas, &palette);
        let lines = build_series_lines(
            &curve_set.curves,
            SeriesSceneContext {
                palette: &palette,
                stroke_width: options.stroke_width,
                eligibility: &options.reveal_series,
                reveal: config.animatable.then_some(&self.reveal),
            },
        );
        let points = build_point_markers(
            &curve_set.curves,
            PointOverlayContext {
                gate: &options.show_points,
                render_point: options.render_point.as_ref(),
                point_radius: options.point_radius,
                palette: &palette,
            },
        );

        debug!(
            records = data.len(),
            series = curve_set.curves.len(),
            regions = regions.len(),
            areas = areas.len(),
            points = points.len(),
            reveal = self.reveal.value(),
            "line chart scene built"
        );

        let scene = compose_scene(
            Viewport::new(config.width, config.height),
            [options.margin.left, options.margin.top],
            SceneParts {
                grid,
                regions,
                areas,
                lines,
                points,
                axes,
            },
        );
        Ok(ChartOutput::Scene(scene))
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let output = self.build_output()?;
        self.renderer.render(&output)
    }

    /// Starts the stroke reveal; see [`RevealController::animate`].
    pub fn animate(
        &mut self,
        now: Duration,
        delay: Duration,
        duration: Duration,
    ) -> ChartResult<RevealHandle> {
        self.reveal.animate(now, delay, duration)
    }

    pub fn tick(&mut self, handle: RevealHandle, now: Duration) -> RevealTick {
        self.reveal.tick(handle, now)
    }

    pub fn reset(&mut self) {
        self.reveal.reset();
    }

    #[must_use]
    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

fn validate_size(config: &ChartConfig) -> ChartResult<()> {
    if !Viewport::new(config.width, config.height).is_valid() {
        return Err(ChartError::InvalidViewport {
            width: config.width,
            height: config.height,
        });
    }
    Ok(())
}
