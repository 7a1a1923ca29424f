use crate::models::{ClassifiedEntry, OperationKey};
use crate::services::classifier::ClassifyError;
use camino::Utf8PathBuf;
use indexmap::IndexMap;

/// Groups classified paths by `(operation, output)`.
///
/// The aggregator is threaded through the classification pass by value:
/// each [`record`](Self::record) consumes it and returns the updated state.
/// Groups iterate in the order their key was first seen, so the emitted
/// arguments never depend on hashing.
#[derive(Debug, Default)]
pub struct OperationAggregator {
    groups: IndexMap<OperationKey, Vec<Utf8PathBuf>>,
    errors: Vec<ClassifyError>,
}

impl OperationAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classification result into the aggregator.
    pub fn record(self, result: Result<ClassifiedEntry, ClassifyError>) -> Self {
        match result {
            Ok(entry) => self.with_entry(entry),
            Err(error) => self.with_error(error),
        }
    }

    /// Append the entry's inputs to its group, creating the group on first sight.
    ///
    /// An entry without inputs (a directory holding no scripts) adds no group.
    pub fn with_entry(mut self, entry: ClassifiedEntry) -> Self {
        if entry.inputs.is_empty() {
            tracing::warn!(
                "Nothing to {} for {}: no script files found",
                entry.operation,
                entry.output
            );
            return self;
        }
        let key = entry.key();
        self.groups.entry(key).or_default().extend(entry.inputs);
        self
    }

    pub fn with_error(mut self, error: ClassifyError) -> Self {
        tracing::warn!("{}", error);
        self.errors.push(error);
        self
    }

    /// Combine two aggregators, appending `other`'s inputs after this one's.
    pub fn merge(mut self, other: OperationAggregator) -> Self {
        for (key, inputs) in other.groups {
            self.groups.entry(key).or_default().extend(inputs);
        }
        self.errors.extend(other.errors);
        self
    }

    /// Groups in first-seen order
    pub fn groups(&self) -> impl Iterator<Item = (&OperationKey, &[Utf8PathBuf])> {
        self.groups.iter().map(|(key, inputs)| (key, inputs.as_slice()))
    }

    pub fn errors(&self) -> &[ClassifyError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Split into the ordered groups and the collected errors.
    pub fn into_parts(self) -> (IndexMap<OperationKey, Vec<Utf8PathBuf>>, Vec<ClassifyError>) {
        (self.groups, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operation;

    fn entry(operation: Operation, output: &str, inputs: &[&str]) -> ClassifiedEntry {
        ClassifiedEntry::new(
            operation,
            output,
            inputs.iter().map(|p| Utf8PathBuf::from(*p)).collect(),
        )
    }

    #[test]
    fn test_equal_keys_merge_in_order() {
        let aggregator = OperationAggregator::new()
            .with_entry(entry(Operation::WriteLoose, "/t/%e.esd", &["/t/a.py"]))
            .with_entry(entry(Operation::WritePy, "/t/%e.py", &["/t/a.esd"]))
            .with_entry(entry(Operation::WriteLoose, "/t/%e.esd", &["/t/b.py"]));

        let groups: Vec<_> = aggregator.groups().collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0.operation, Operation::WriteLoose);
        assert_eq!(
            groups[0].1,
            &[Utf8PathBuf::from("/t/a.py"), Utf8PathBuf::from("/t/b.py")]
        );
        assert_eq!(groups[1].0.operation, Operation::WritePy);
    }

    #[test]
    fn test_same_output_different_operation_stays_apart() {
        let aggregator = OperationAggregator::new()
            .with_entry(entry(Operation::WriteBnd, "/t", &["/t/x/a.py"]))
            .with_entry(entry(Operation::WriteBndFile, "/t", &["/t/x/b.py"]));

        assert_eq!(aggregator.group_count(), 2);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let aggregator = OperationAggregator::new()
            .with_entry(entry(Operation::WriteLoose, "/t/%e.esd", &["/t/a.py"]))
            .with_entry(entry(Operation::WriteLoose, "/t/%e.esd", &["/t/a.py"]));

        let (groups, _) = aggregator.into_parts();
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_empty_entry_adds_no_group() {
        let aggregator =
            OperationAggregator::new().with_entry(entry(Operation::WriteBnd, "/t", &[]));

        assert_eq!(aggregator.group_count(), 0);
        assert!(!aggregator.has_errors());
    }

    #[test]
    fn test_errors_collected_alongside_groups() {
        let aggregator = OperationAggregator::new()
            .record(Err(ClassifyError::NotFound("/t/gone.py".into())))
            .record(Ok(entry(Operation::WriteLoose, "/t/%e.esd", &["/t/a.py"])))
            .record(Err(ClassifyError::Unrecognized("/t/x.txt".into())));

        assert_eq!(aggregator.group_count(), 1);
        assert_eq!(aggregator.errors().len(), 2);
        assert!(matches!(aggregator.errors()[0], ClassifyError::NotFound(_)));
    }

    #[test]
    fn test_merge_appends_inputs() {
        let first = OperationAggregator::new()
            .with_entry(entry(Operation::WriteLoose, "/t/%e.esd", &["/t/a.py", "/t/b.py"]));
        let second = OperationAggregator::new()
            .with_entry(entry(Operation::WritePy, "/t/%e.py", &["/t/c.esd"]))
            .with_entry(entry(Operation::WriteLoose, "/t/%e.esd", &["/t/a.py", "/t/b.py"]));

        let merged = first.merge(second);
        let groups: Vec<_> = merged.groups().collect();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0.operation, Operation::WriteLoose);
        let names: Vec<&str> = groups[0].1.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["/t/a.py", "/t/b.py", "/t/a.py", "/t/b.py"]);
        assert_eq!(groups[1].0.operation, Operation::WritePy);
    }
}
