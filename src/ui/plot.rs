use serde_json::json;

use crate::color::{self, ColorMap};
use crate::data::error::DataError;
use crate::data::model::{CellValue, Table};
use crate::data::schema;

use super::figure::{
    Axis, Bar, ColorAxis, ColorBar, Choropleth, CurrentValue, Figure, Frame, Layout, Legend,
    Margin, Marker, MenuButton, Scatter, Slider, SliderStep, Title, Trace, UpdateMenu,
};

// Presentation constants, kept literal.
const CONTINENT_TEMP_RANGE: (f64, f64) = (6.0, 24.0);
const GLOBAL_TEMP_RANGE: (f64, f64) = (-4.0, 35.0);
const BAR_OPACITY: f64 = 0.8;
const FRAME_DURATION_MS: u32 = 500;

// ---------------------------------------------------------------------------
// Static charts
// ---------------------------------------------------------------------------

/// Animated bar chart of temperature per region, one frame per year.
pub fn continent_temperature(table: &Table) -> Result<Figure, DataError> {
    let regions = table.column(schema::REGION)?;
    let years = table.column(schema::YEAR)?;
    let temps = table.column(schema::TEMP)?;

    let labels: Vec<String> = regions.iter().map(|r| r.to_string()).collect();
    let colors = ColorMap::new(labels.iter().map(String::as_str));

    let frames: Vec<Frame> = group_rows(years)
        .into_iter()
        .map(|(year, rows)| Frame {
            name: year,
            data: colors
                .legend_entries()
                .iter()
                .map(|(region, rgb)| {
                    let in_region: Vec<usize> =
                        rows.iter().copied().filter(|&i| labels[i] == *region).collect();
                    Trace::Bar(Bar {
                        x: pick(regions, &in_region),
                        y: pick(temps, &in_region),
                        name: region.clone(),
                        legendgroup: region.clone(),
                        showlegend: true,
                        marker: Marker {
                            color: color::to_hex(*rgb),
                            opacity: BAR_OPACITY,
                        },
                        hovertemplate: format!(
                            "{}=%{{x}}<br>{}=%{{y}}<extra></extra>",
                            schema::REGION,
                            schema::TEMP
                        ),
                    })
                })
                .collect(),
        })
        .collect();

    let (updatemenus, sliders) = animation_controls(&frames, schema::YEAR, false);
    let (lo, hi) = CONTINENT_TEMP_RANGE;

    Ok(Figure {
        data: frames.first().map(|f| f.data.clone()).unwrap_or_default(),
        layout: Layout {
            title: Some(Title::new(
                "Temperature On Populated Continents Over the Years",
            )),
            xaxis: Some(Axis::titled(schema::REGION)),
            yaxis: Some(Axis::titled("Temperature °C").range(lo, hi)),
            legend: Some(Legend {
                title: Title::new(schema::REGION),
                tracegroupgap: 0,
            }),
            updatemenus,
            sliders,
            ..Default::default()
        },
        frames,
    })
}

/// Animated world map of average temperature per country, one frame per date.
pub fn global_temperature_map(table: &Table) -> Result<Figure, DataError> {
    let countries = table.column(schema::COUNTRY)?;
    let dates = table.column(schema::DATE)?;
    let temps = table.column(schema::AVERAGE_TEMPERATURE)?;

    let color_label = "Average Temperature (°C)";

    let frames: Vec<Frame> = group_rows(dates)
        .into_iter()
        .map(|(date, rows)| Frame {
            name: date,
            data: vec![Trace::Choropleth(Choropleth {
                locations: pick(countries, &rows),
                z: pick(temps, &rows),
                locationmode: "country names".to_string(),
                coloraxis: "coloraxis".to_string(),
                hovertemplate: format!(
                    "{}=%{{location}}<br>{color_label}=%{{z}}<extra></extra>",
                    schema::COUNTRY
                ),
            })],
        })
        .collect();

    let (updatemenus, sliders) = animation_controls(&frames, schema::DATE, true);
    let (cmin, cmax) = GLOBAL_TEMP_RANGE;

    Ok(Figure {
        data: frames.first().map(|f| f.data.clone()).unwrap_or_default(),
        layout: Layout {
            margin: Some(Margin {
                t: 0,
                b: 0,
                l: 0,
                r: 0,
            }),
            autosize: Some(true),
            coloraxis: Some(ColorAxis {
                colorscale: color::diverging_scale(),
                cmin,
                cmax,
                colorbar: ColorBar {
                    title: Title::new(color_label),
                },
            }),
            updatemenus,
            sliders,
            ..Default::default()
        },
        frames,
    })
}

/// Ice extent and ice area over the years, legend hidden.
pub fn arctic_ice(table: &Table) -> Result<Figure, DataError> {
    let years = table.column(schema::ICE_YEAR)?;
    Ok(Figure {
        data: vec![
            Trace::Scatter(
                Scatter::new(years, table.column(schema::ICE_EXTENT)?).name("Ice Extent"),
            ),
            Trace::Scatter(Scatter::new(years, table.column(schema::ICE_AREA)?).name("Ice Area")),
        ],
        layout: line_layout(
            "Arctic Ice Levels",
            "Years",
            "km of Ice for extent, km squared for area",
            Some(false),
        ),
        frames: Vec::new(),
    })
}

/// Sea level rise in millimetres over the years.
pub fn sea_levels(table: &Table) -> Result<Figure, DataError> {
    Ok(Figure {
        data: vec![Trace::Scatter(Scatter::new(
            table.column(schema::YEAR)?,
            table.column(schema::SEA_LEVEL_MM)?,
        ))],
        layout: line_layout("Sea Levels vs Year", "Year", "Rise in Sea Levels (mm)", None),
        frames: Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Hurricane charts (built per selection)
// ---------------------------------------------------------------------------

/// Adjusted and unadjusted hurricane counts, in that order, legend hidden.
pub fn hurricane_count(table: &Table) -> Result<Figure, DataError> {
    let years = table.column(schema::YEAR)?;
    Ok(Figure {
        data: vec![
            Trace::Scatter(
                Scatter::new(years, table.column(schema::HURRICANES_ADJUSTED)?)
                    .name("Adjusted for Technology Limitations"),
            ),
            Trace::Scatter(
                Scatter::new(years, table.column(schema::HURRICANES_UNADJUSTED)?)
                    .name("Unadjusted"),
            ),
        ],
        layout: line_layout("Hurricane Count vs Year", "Year", "Hurricane Count", Some(false)),
        frames: Vec::new(),
    })
}

/// Accumulated cyclone energy index over the years.
pub fn cyclone_energy(table: &Table) -> Result<Figure, DataError> {
    Ok(Figure {
        data: vec![Trace::Scatter(Scatter::new(
            table.column(schema::YEAR)?,
            table.column(schema::ACE)?,
        ))],
        layout: line_layout(
            "Acculated Cyclone Energy vs Year",
            "Year",
            "Accumulated Cyclone Energy Index",
            None,
        ),
        frames: Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn line_layout(title: &str, x_title: &str, y_title: &str, showlegend: Option<bool>) -> Layout {
    Layout {
        title: Some(Title::new(title)),
        xaxis: Some(Axis::titled(x_title)),
        yaxis: Some(Axis::titled(y_title)),
        showlegend,
        ..Default::default()
    }
}

/// Row indices grouped by the key's text, groups in order of first appearance.
fn group_rows(keys: &[CellValue]) -> Vec<(String, Vec<usize>)> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (row, key) in keys.iter().enumerate() {
        let key = key.to_string();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, rows)) => rows.push(row),
            None => groups.push((key, vec![row])),
        }
    }
    groups
}

fn pick(column: &[CellValue], rows: &[usize]) -> Vec<CellValue> {
    rows.iter().map(|&i| column[i].clone()).collect()
}

/// Play/pause buttons and a slider stepping through `frames`.
fn animation_controls(
    frames: &[Frame],
    key: &str,
    redraw: bool,
) -> (Vec<UpdateMenu>, Vec<Slider>) {
    if frames.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let play = json!({
        "frame": {"duration": FRAME_DURATION_MS, "redraw": redraw},
        "mode": "immediate",
        "fromcurrent": true,
        "transition": {"duration": FRAME_DURATION_MS, "easing": "linear"},
    });
    let jump = json!({
        "frame": {"duration": 0, "redraw": redraw},
        "mode": "immediate",
        "fromcurrent": true,
        "transition": {"duration": 0, "easing": "linear"},
    });

    let menu = UpdateMenu {
        kind: "buttons".to_string(),
        direction: "left".to_string(),
        showactive: false,
        x: 0.1,
        y: 0.0,
        xanchor: "right".to_string(),
        yanchor: "top".to_string(),
        buttons: vec![
            MenuButton {
                label: "&#9654;".to_string(),
                method: "animate".to_string(),
                args: json!([null, play]),
            },
            MenuButton {
                label: "&#9724;".to_string(),
                method: "animate".to_string(),
                args: json!([[null], jump]),
            },
        ],
    };

    let slider = Slider {
        active: 0,
        currentvalue: CurrentValue {
            prefix: format!("{key}="),
        },
        len: 0.9,
        x: 0.1,
        y: 0.0,
        xanchor: "left".to_string(),
        yanchor: "top".to_string(),
        steps: frames
            .iter()
            .map(|frame| SliderStep {
                label: frame.name.clone(),
                method: "animate".to_string(),
                args: json!([[frame.name], jump]),
            })
            .collect(),
    };

    (vec![menu], vec![slider])
}
