//! Plotly figure JSON for the two dashboard charts.

use serde_json::{json, Value};
use shared::protocol::{PieChart, ScatterChart};

pub fn pie_figure(chart: &PieChart) -> Value {
    let labels: Vec<&str> = chart.slices.iter().map(|slice| slice.label.as_str()).collect();
    let values: Vec<u64> = chart.slices.iter().map(|slice| slice.value).collect();

    json!({
        "data": [{
            "type": "pie",
            "labels": labels,
            "values": values,
        }],
        "layout": {
            "title": { "text": chart.title },
        },
    })
}

pub fn scatter_figure(chart: &ScatterChart) -> Value {
    let traces: Vec<Value> = chart
        .series
        .iter()
        .map(|series| {
            let x: Vec<f64> = series.points.iter().map(|p| p.payload_mass_kg).collect();
            let y: Vec<u8> = series.points.iter().map(|p| p.outcome.class()).collect();
            json!({
                "type": "scatter",
                "mode": "markers",
                "name": series.booster_version,
                "x": x,
                "y": y,
            })
        })
        .collect();

    json!({
        "data": traces,
        "layout": {
            "title": { "text": chart.title },
            "xaxis": { "title": { "text": "Payload Mass (kg)" } },
            "yaxis": { "title": { "text": "class" } },
            "legend": { "title": { "text": "Booster Version" } },
        },
    })
}
