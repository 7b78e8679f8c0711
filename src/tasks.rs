//! Test task selection
//!
//! Resolves source elements to the runnable test tasks of their module,
//! narrows them with an optional contextual suffix and groups them by
//! presentable name. When exactly one group remains it is run directly;
//! several groups are handed to a [`TaskChooser`].

use indexmap::IndexMap;
use tracing::debug;

/// A test task declared by a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRunTask {
    /// Target the task belongs to (e.g. `jvm`, `js`)
    pub target_name: Option<String>,
    pub task_name: String,
}

impl TestRunTask {
    pub fn new(target_name: Option<&str>, task_name: &str) -> Self {
        Self {
            target_name: target_name.map(str::to_string),
            task_name: task_name.to_string(),
        }
    }

    /// Target name, or the task path when there is no target
    pub fn presentable_name(&self) -> String {
        match &self.target_name {
            Some(target) => target.clone(),
            None => format!(":{}", self.task_name),
        }
    }

    /// Tasks to run for this test task: clean first, then the task itself
    pub fn task_names(&self) -> Vec<String> {
        vec![
            format!("clean{}", capitalize_ascii(&self.task_name)),
            self.task_name.clone(),
        ]
    }
}

/// Concrete task list for one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksToRun {
    pub test_name: String,
    pub tasks: Vec<String>,
}

/// What a source element resolves to
#[derive(Debug, Clone)]
pub struct ElementTasks {
    pub source_path: String,
    pub tasks: Vec<TestRunTask>,
}

/// Resolves an element to its source file and module test tasks
pub trait TaskSource<E> {
    /// `None` when the element has no module or no source file
    fn resolve(&self, element: &E) -> Option<ElementTasks>;
}

impl<E, F> TaskSource<E> for F
where
    F: Fn(&E) -> Option<ElementTasks>,
{
    fn resolve(&self, element: &E) -> Option<ElementTasks> {
        self(element)
    }
}

/// Tasks of one group keyed by source path
pub type SourceTasks = IndexMap<String, TasksToRun>;

/// Groups keyed by presentable name, in discovery order
pub type TaskGroups = IndexMap<String, SourceTasks>;

pub type TaskFilter = Box<dyn Fn(&TestRunTask) -> bool + Send + Sync>;

/// Picks among several task groups
pub trait TaskChooser {
    fn choose(&mut self, groups: &TaskGroups) -> Vec<SourceTasks>;
}

/// Chooser that runs every group without asking
#[derive(Debug, Default, Clone, Copy)]
pub struct RunAllChooser;

impl TaskChooser for RunAllChooser {
    fn choose(&mut self, groups: &TaskGroups) -> Vec<SourceTasks> {
        groups.values().cloned().collect()
    }
}

/// Build a filter from a suffix like `"js, browser, HeadlessChrome85"`
///
/// The first part must equal the target name. A second part additionally
/// requires the task name to start with `<target><Second>`.
pub fn contextual_filter(suffix: Option<&str>) -> TaskFilter {
    let parts: Vec<String> = suffix
        .map(|s| {
            s.split(", ")
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let Some(target) = parts.first().cloned() else {
        return Box::new(|_: &TestRunTask| true);
    };

    match parts.get(1) {
        None => Box::new(move |task: &TestRunTask| {
            task.target_name.as_deref() == Some(target.as_str())
        }),
        Some(second) => {
            let prefix = format!("{}{}", target, capitalize_ascii(second));
            Box::new(move |task: &TestRunTask| {
                task.target_name.as_deref() == Some(target.as_str())
                    && task.task_name.starts_with(&prefix)
            })
        }
    }
}

/// Resolve and group the test tasks of `elements`
pub fn resolve_test_tasks<'a, E, S>(
    elements: impl IntoIterator<Item = &'a E>,
    source: &S,
    filter: &TaskFilter,
) -> TaskGroups
where
    E: 'a,
    S: TaskSource<E> + ?Sized,
{
    let mut groups = TaskGroups::new();

    for element in elements {
        let Some(resolved) = source.resolve(element) else {
            continue;
        };

        let mut by_target: IndexMap<Option<&str>, Vec<&TestRunTask>> = IndexMap::new();
        for task in resolved.tasks.iter().filter(|t| filter(*t)) {
            by_target
                .entry(task.target_name.as_deref())
                .or_default()
                .push(task);
        }

        for (target, tasks) in by_target {
            let single = tasks.len() == 1;
            for task in tasks {
                let name = if single {
                    task.presentable_name()
                } else {
                    match target {
                        Some(group) => format!("{} (:{})", group, task.task_name),
                        None => format!(":{}", task.task_name),
                    }
                };
                let to_run = TasksToRun {
                    test_name: name.clone(),
                    tasks: task.task_names(),
                };
                groups
                    .entry(name)
                    .or_default()
                    .insert(resolved.source_path.clone(), to_run);
            }
        }
    }

    groups
}

/// Resolve tasks for `elements` and decide which groups to run
///
/// One group runs directly, no groups yields nothing, and several groups are
/// passed to `chooser`.
pub fn choose_tasks<'a, E, S, C>(
    elements: impl IntoIterator<Item = &'a E>,
    source: &S,
    contextual_suffix: Option<&str>,
    chooser: &mut C,
) -> Vec<SourceTasks>
where
    E: 'a,
    S: TaskSource<E> + ?Sized,
    C: TaskChooser + ?Sized,
{
    let filter = contextual_filter(contextual_suffix);
    let groups = resolve_test_tasks(elements, source, &filter);

    match groups.len() {
        0 => {
            debug!("No test tasks matched");
            Vec::new()
        }
        1 => groups.into_values().collect(),
        n => {
            debug!("{} test task groups, asking chooser", n);
            chooser.choose(&groups)
        }
    }
}

/// Uppercase the first character if it is an ASCII letter
pub fn capitalize_ascii(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}
