//! Post-load listener.
//!
//! On every "record loaded" notification the listener resolves the record
//! type's enum field map (cached after the first call) and replaces each
//! non-null raw value with its canonical enum member. The mapping layer's
//! clean-value snapshot is patched too, so the coercion is not mistaken for
//! a pending change.

use crate::{
    cache::{EnumField, EnumFieldCache, EnumFieldMap, MemoryCache},
    config::{ConfigError, EnumHookConfig},
    enums::EnumRef,
    error::Error,
    materialize::materialize_value,
    metadata::{AnnotationSource, LoadEvent, MetadataSource, Session},
    obs::sink::{self, MetricsEvent, MetricsSink, with_metrics_sink},
    resolve::{mapped, resolve_enum_fields},
    value::Value,
};
use std::sync::Arc;

///
/// EnumLoadListener
///

pub struct EnumLoadListener<A> {
    annotations: A,
    cache: Arc<dyn EnumFieldCache>,
    metrics: Option<&'static dyn MetricsSink>,
}

impl<A: AnnotationSource> EnumLoadListener<A> {
    /// Build a listener with the default unbounded in-memory cache.
    pub fn new(annotations: A) -> Self {
        Self::with_cache(annotations, Arc::new(MemoryCache::new()))
    }

    pub fn with_cache(annotations: A, cache: Arc<dyn EnumFieldCache>) -> Self {
        Self {
            annotations,
            cache,
            metrics: None,
        }
    }

    /// Build a listener whose cache backend is chosen by `config`.
    pub fn from_config(annotations: A, config: &EnumHookConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_cache(annotations, config.build_cache()?))
    }

    /// Route this listener's metrics events to `sink` instead of the
    /// thread-local counters.
    #[must_use]
    pub const fn metrics_sink(mut self, sink: &'static dyn MetricsSink) -> Self {
        self.metrics = Some(sink);
        self
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<dyn EnumFieldCache> {
        &self.cache
    }

    fn with_metrics<T>(&self, f: impl FnOnce() -> T) -> T {
        if let Some(sink) = self.metrics {
            with_metrics_sink(sink, f)
        } else {
            f()
        }
    }

    /// Enum field map for `record_type`, from cache or freshly resolved.
    pub fn resolve<S: MetadataSource + ?Sized>(
        &self,
        source: &S,
        record_type: &str,
    ) -> Result<Arc<EnumFieldMap>, Error> {
        self.with_metrics(|| self.resolve_inner(source, record_type))
    }

    /// Populate the cache for `record_type` ahead of its first load.
    pub fn warm_up<S: MetadataSource + ?Sized>(
        &self,
        source: &S,
        record_type: &str,
    ) -> Result<(), Error> {
        self.resolve(source, record_type).map(|_| ())
    }

    /// Warm up several record types, stopping at the first failure.
    pub fn warm_up_all<S, I>(&self, source: &S, record_types: I) -> Result<(), Error>
    where
        S: MetadataSource + ?Sized,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        record_types
            .into_iter()
            .try_for_each(|record_type| self.warm_up(source, record_type.as_ref()))
    }

    /// Materialize every enum field of a freshly loaded record.
    ///
    /// All fields are read and validated before anything is written, so a
    /// rejected value leaves both the record and the change tracker untouched.
    /// If the host refuses a write, the fields already written are still
    /// registered as clean before the error is returned.
    pub fn on_load<S: Session + ?Sized>(&self, event: LoadEvent<'_, S>) -> Result<(), Error> {
        self.with_metrics(|| self.on_load_inner(event))
    }

    fn on_load_inner<S: Session + ?Sized>(&self, event: LoadEvent<'_, S>) -> Result<(), Error> {
        let LoadEvent { record, session } = event;
        let record_type = session.record_type_of(record);
        sink::record(MetricsEvent::LoadStart {
            record_type: &record_type,
        });

        let fields = self.resolve_inner(&*session, &record_type)?;
        if fields.is_empty() {
            return Ok(());
        }

        let (written, write_err) = {
            let metadata = mapped(session.metadata(&record_type)?)?;

            let mut resolved: Vec<(&str, EnumRef)> = Vec::with_capacity(fields.len());
            for EnumField { field, enum_type } in fields.fields() {
                let raw = metadata.field_value(record, field)?;

                match materialize_value(&raw, enum_type) {
                    Ok(Some(member)) => resolved.push((field, member)),
                    Ok(None) => sink::record(MetricsEvent::FieldSkipped {
                        record_type: &record_type,
                        field,
                    }),
                    Err(err) => {
                        sink::record(MetricsEvent::InvalidValue {
                            record_type: &record_type,
                            field,
                        });
                        tracing::debug!(
                            record_type = %record_type,
                            field,
                            error = %err,
                            "enum field rejected on load"
                        );

                        return Err(err.into());
                    }
                }
            }

            let mut written = Vec::with_capacity(resolved.len());
            let mut write_err = None;
            for (field, member) in resolved {
                if let Err(err) = metadata.set_field_value(record, field, Value::Enum(member)) {
                    write_err = Some(err);
                    break;
                }
                sink::record(MetricsEvent::FieldMaterialized {
                    record_type: &record_type,
                    field,
                });
                written.push((field, member));
            }

            (written, write_err)
        };

        // written fields stay clean even when a later write failed
        let identity = session.record_identity(record);
        let tracker = session.change_tracker();
        for (field, member) in written {
            tracker.set_original_value(identity, field, Value::Enum(member));
        }

        if let Some(err) = write_err {
            tracing::debug!(record_type = %record_type, error = %err, "enum field write rejected");
            return Err(err);
        }

        tracing::trace!(record_type = %record_type, %identity, "enum fields materialized");

        Ok(())
    }

    fn resolve_inner<S: MetadataSource + ?Sized>(
        &self,
        source: &S,
        record_type: &str,
    ) -> Result<Arc<EnumFieldMap>, Error> {
        if let Some(hit) = self.cache.fetch(record_type) {
            sink::record(MetricsEvent::CacheHit { record_type });
            return Ok(hit);
        }
        sink::record(MetricsEvent::CacheMiss { record_type });

        let computed = source
            .metadata(record_type)
            .and_then(|metadata| resolve_enum_fields(mapped(metadata)?, &self.annotations));

        match computed {
            Ok(map) => {
                let map = Arc::new(map);
                self.cache.save(record_type, Arc::clone(&map));

                sink::record(MetricsEvent::Resolved {
                    record_type,
                    enum_fields: map.len() as u64,
                });
                tracing::debug!(record_type, enum_fields = map.len(), "enum field map cached");

                Ok(map)
            }
            Err(err) => {
                sink::record(MetricsEvent::ResolveFailed { record_type });
                tracing::debug!(record_type, error = %err, "enum field resolution failed");

                Err(err)
            }
        }
    }
}

///
/// TESTS
///
