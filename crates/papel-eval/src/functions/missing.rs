//! Missing-value helpers and serialization

use crate::catalog::FunctionCatalog;
use papel_types::Value;
use std::sync::Arc;

pub(crate) fn register(catalog: &mut FunctionCatalog) {
    catalog.register(
        "coalesce",
        Arc::new(|args, _ctx| {
            // First argument that is present, not the first truthy one:
            // zero and the empty string count
            Ok(args
                .iter()
                .find(|value| !value.is_missing())
                .cloned()
                .unwrap_or(Value::Absent))
        }),
    );

    catalog.register(
        "json",
        Arc::new(|args, _ctx| {
            let value = args.first().unwrap_or(&Value::Absent);
            let text = serde_json::to_string(&value.to_json()).unwrap_or_default();
            Ok(Value::String(text))
        }),
    );
}
