//! Prompt rendering.
//!
//! Each request type has a fixed template into which fields of the caller's
//! `data` object are embedded as pretty-printed JSON. Rendering is
//! deterministic: the same kind and data always produce the same text, and a
//! missing field renders as its empty default (`[]`, `{}`, `""` or `0`).

use serde_json::{json, Value};

use crate::kind::AssistKind;

/// Render the user message for `kind` from the request's `data` object.
pub fn render_prompt(kind: AssistKind, data: &Value) -> String {
    let fields = Fields(data);
    match kind {
        AssistKind::TaskSuggestions => task_suggestions(&fields),
        AssistKind::SmartCategorization => smart_categorization(&fields),
        AssistKind::ProductivityInsights => productivity_insights(&fields),
        AssistKind::TimeEstimation => time_estimation(&fields),
        AssistKind::DailySummary => daily_summary(&fields),
    }
}

/// Read-only accessor over the request payload with empty-value fallbacks.
struct Fields<'a>(&'a Value);

impl Fields<'_> {
    fn get(&self, path: &[&str]) -> Option<&Value> {
        let mut current = self.0;
        for key in path {
            current = current.get(key)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// Field as pretty JSON, or `fallback` when absent.
    fn json(&self, path: &[&str], fallback: Value) -> String {
        let value = self.get(path).cloned().unwrap_or(fallback);
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }

    fn list(&self, path: &[&str]) -> String {
        self.json(path, json!([]))
    }

    fn object(&self, path: &[&str]) -> String {
        self.json(path, json!({}))
    }

    /// Field as plain text. Strings render unquoted, other values as JSON.
    fn text(&self, path: &[&str], fallback: &str) -> String {
        match self.get(path) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::String(_)) | None => fallback.to_string(),
            Some(other) => other.to_string(),
        }
    }

    fn items(&self, path: &[&str]) -> Vec<&Value> {
        self.get(path)
            .and_then(Value::as_array)
            .map(|items| items.iter().collect())
            .unwrap_or_default()
    }
}

fn task_suggestions(f: &Fields) -> String {
    format!(
        "Using the user and project context below, propose 5 tasks the user should consider adding.

User context:
- Current tasks: {current}
- Recently completed tasks: {completed}
- Work patterns: {patterns}

Project context:
- Active projects: {projects}
- Upcoming deadlines: {deadlines}

Good suggestions:
1. Fit the user's current work
2. Respect their work patterns and productivity
3. Help meet upcoming deadlines
4. Break large projects into manageable pieces
5. Account for dependencies between tasks

Reply with a JSON array of objects with these fields:
- title: string
- description: string
- priority: \"low\" | \"medium\" | \"high\" | \"urgent\"
- estimatedTime: number (minutes)
- suggestedProject: string (project ID) or null
- reasoning: string (why this task is suggested)
- tags: string[]",
        current = f.list(&["userContext", "currentTasks"]),
        completed = f.list(&["userContext", "recentCompleted"]),
        patterns = f.object(&["userContext", "workPatterns"]),
        projects = f.list(&["projectContext", "projects"]),
        deadlines = f.list(&["projectContext", "upcomingDeadlines"]),
    )
}

fn smart_categorization(f: &Fields) -> String {
    let projects: Vec<String> = f
        .items(&["existingProjects"])
        .into_iter()
        .map(|p| {
            let name = p.get("name").and_then(Value::as_str).unwrap_or("");
            let id = p.get("id").map(|id| match id {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
            format!("- {name} ({})", id.unwrap_or_default())
        })
        .collect();
    let tags: Vec<String> = f
        .items(&["existingTags"])
        .into_iter()
        .map(|t| t.as_str().map(str::to_string).unwrap_or_else(|| t.to_string()))
        .collect();

    format!(
        "Pick the best project and tags for this task.

Task: {title}
Description: {description}

Existing projects:
{projects}

Existing tags:
{tags}

Suggest:
1. The best-fitting project, or \"new\" if none fits
2. 3 to 5 relevant tags (existing or new)
3. A priority based on the task content
4. An estimated time to complete

Reply with JSON:
{{
  \"suggestedProject\": \"project_id_or_new\",
  \"suggestedProjectName\": \"name for the new project when suggestedProject is new\",
  \"suggestedTags\": [\"tag1\", \"tag2\", \"tag3\"],
  \"suggestedPriority\": \"low|medium|high|urgent\",
  \"estimatedTime\": 45,
  \"reasoning\": \"short explanation\"
}}",
        title = f.text(&["taskTitle"], ""),
        description = f.text(&["taskDescription"], "No description provided"),
        projects = projects.join("\n"),
        tags = tags.join(", "),
    )
}

fn productivity_insights(f: &Fields) -> String {
    format!(
        "Review this productivity data and give actionable insights.

Data:
- Tasks completed: {completed}
- Time spent: {time_spent}
- Task patterns: {patterns}
- Completion rates: {rates}
- Productivity by time of day: {by_time}
- Productivity by day of week: {by_day}

Cover:
1. The most productive periods
2. Task completion patterns
3. Areas to improve
4. Time management suggestions
5. Signs of burnout risk
6. Scheduling recommendations

Reply with JSON:
{{
  \"insights\": [
    {{
      \"type\": \"productivity_pattern|recommendation|warning\",
      \"title\": \"short title\",
      \"description\": \"detailed explanation\",
      \"actionable\": true,
      \"suggestions\": [\"suggestion1\", \"suggestion2\"]
    }}
  ],
  \"productivityScore\": 85,
  \"peakProductivityTimes\": [\"morning\", \"afternoon\"],
  \"recommendations\": [\"recommendation1\", \"recommendation2\"]
}}",
        completed = f.list(&["tasksCompleted"]),
        time_spent = f.object(&["timeSpent"]),
        patterns = f.object(&["taskPatterns"]),
        rates = f.object(&["completionRates"]),
        by_time = f.object(&["productivityByTimeOfDay"]),
        by_day = f.object(&["productivityByDayOfWeek"]),
    )
}

fn time_estimation(f: &Fields) -> String {
    format!(
        "Estimate how long this task will take.

Task: {title}
Description: {description}
Type: {task_type}
Complexity: {complexity}

The user's history on similar tasks:
{history}

Take into account:
- How the user performed on similar tasks
- The task's complexity and scope
- Typical effort for this kind of work
- The user's pace and work patterns

Reply with JSON:
{{
  \"estimatedTime\": 120,
  \"confidence\": 0.8,
  \"timeRange\": {{ \"min\": 90, \"max\": 150 }},
  \"factors\": [\"factor1\", \"factor2\"],
  \"comparableTasks\": [
    {{ \"task\": \"similar task\", \"actualTime\": 115, \"similarity\": 0.85 }}
  ],
  \"recommendations\": [\"Split into subtasks\", \"Start with research\"]
}}",
        title = f.text(&["taskTitle"], ""),
        description = f.text(&["taskDescription"], "No description"),
        task_type = f.text(&["taskType"], ""),
        complexity = f.text(&["complexity"], ""),
        history = f.list(&["userHistoricalData"]),
    )
}

fn daily_summary(f: &Fields) -> String {
    format!(
        "Write a summary of today's productivity.

Today:
- Tasks completed: {completed}
- Tasks in progress: {in_progress}
- Tasks created: {created}
- Time spent: {time_spent} minutes
- Productivity score: {score}
- Upcoming deadlines: {deadlines}

Keep it friendly and motivating, and include:
1. Celebration of what was accomplished
2. Acknowledgement of progress
3. Priorities for tomorrow
4. A motivational message
5. Any concerns about upcoming deadlines

Reply with JSON:
{{
  \"summary\": \"overall summary\",
  \"highlights\": [\"highlight1\", \"highlight2\"],
  \"accomplishments\": [\"accomplishment1\", \"accomplishment2\"],
  \"tomorrowPriorities\": [\"priority1\", \"priority2\"],
  \"motivationalMessage\": \"message\",
  \"productivityRating\": \"excellent|good|moderate|needs_improvement\",
  \"deadlineAlerts\": [\"alert1\", \"alert2\"]
}}",
        completed = f.list(&["tasksCompleted"]),
        in_progress = f.list(&["tasksInProgress"]),
        created = f.list(&["tasksCreated"]),
        time_spent = f.text(&["timeSpent"], "0"),
        score = f.text(&["productivityScore"], "0"),
        deadlines = f.list(&["upcomingDeadlines"]),
    )
}
