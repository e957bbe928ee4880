use std::collections::BTreeSet;

use analytics::{payload_outcome, success_distribution, AnalyticsContext};
use serde_json::Value;
use shared::{
    domain::{PayloadRange, SiteSelector},
    error::ApiException,
    protocol::{
        UpdateResponse, PAYLOAD_SCATTER_CHART, PAYLOAD_SLIDER, SITE_DROPDOWN, SUCCESS_PIE_CHART,
    },
};
use tracing::debug;

use crate::figures::{pie_figure, scatter_figure};

/// Current value of every dashboard control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlValues {
    pub site: SiteSelector,
    pub payload: PayloadRange,
}

pub type Handler = fn(&AnalyticsContext, &ControlValues) -> Value;

pub struct Binding {
    pub output: &'static str,
    pub inputs: &'static [&'static str],
    handler: Handler,
}

impl Binding {
    fn watches_any(&self, changed: &[String]) -> bool {
        changed.iter().any(|id| self.inputs.contains(&id.as_str()))
    }
}

/// Maps watched controls to the chart each one regenerates.
#[derive(Default)]
pub struct CallbackRegistry {
    bindings: Vec<Binding>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        output: &'static str,
        inputs: &'static [&'static str],
        handler: Handler,
    ) -> &mut Self {
        self.bindings.push(Binding {
            output,
            inputs,
            handler,
        });
        self
    }

    pub fn dashboard() -> Self {
        let mut registry = Self::new();
        registry
            .register(SUCCESS_PIE_CHART, &[SITE_DROPDOWN], render_success_pie)
            .register(
                PAYLOAD_SCATTER_CHART,
                &[SITE_DROPDOWN, PAYLOAD_SLIDER],
                render_payload_scatter,
            );
        registry
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn watched_controls(&self) -> BTreeSet<&'static str> {
        self.bindings
            .iter()
            .flat_map(|binding| binding.inputs.iter().copied())
            .collect()
    }

    /// Re-renders every output bound to a changed control. An empty `changed`
    /// list re-renders everything.
    pub fn dispatch(
        &self,
        ctx: &AnalyticsContext,
        changed: &[String],
        values: &ControlValues,
    ) -> Result<UpdateResponse, ApiException> {
        let watched = self.watched_controls();
        if let Some(unknown) = changed.iter().find(|id| !watched.contains(id.as_str())) {
            return Err(ApiException::validation(format!("unknown control '{unknown}'")));
        }

        let mut response = UpdateResponse::default();
        for binding in &self.bindings {
            if changed.is_empty() || binding.watches_any(changed) {
                debug!(output = binding.output, "re-rendering chart");
                response
                    .figures
                    .insert(binding.output.to_string(), (binding.handler)(ctx, values));
            }
        }
        Ok(response)
    }
}

fn render_success_pie(ctx: &AnalyticsContext, values: &ControlValues) -> Value {
    pie_figure(&success_distribution(ctx, &values.site))
}

fn render_payload_scatter(ctx: &AnalyticsContext, values: &ControlValues) -> Value {
    scatter_figure(&payload_outcome(ctx, &values.site, values.payload))
}

#[cfg(test)]
#[path = "tests/callbacks_tests.rs"]
mod tests;
