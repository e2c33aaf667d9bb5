use colored::Colorize;

use crate::domain::entities::RepositoryDescriptor;
use crate::domain::value_objects::TagSelector;
use crate::presentation::ui::DisplayHelper;

/// Handler for the list command
pub struct ListCommand {
    pub selector: TagSelector,
}

impl ListCommand {
    pub fn new(selector: TagSelector) -> Self {
        Self { selector }
    }

    /// Name, location and tag of every selected repository
    pub fn render(&self, repos: &[RepositoryDescriptor], display: &DisplayHelper) -> String {
        let rows: Vec<Vec<String>> = repos
            .iter()
            .filter(|repo| self.selector.matches(repo.tag()))
            .map(|repo| {
                let name = if display.use_color {
                    repo.name.cyan().to_string()
                } else {
                    repo.name.clone()
                };
                vec![
                    name,
                    repo.location.display().to_string(),
                    repo.tag().unwrap_or_default().to_string(),
                ]
            })
            .collect();

        display.render_table(&["Name", "Location", "Tag"], &rows)
    }

    pub fn execute(&self, repos: &[RepositoryDescriptor], display: &DisplayHelper) {
        print!("{}", self.render(repos, display));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_applies_tag_filter() {
        let repos = vec![
            RepositoryDescriptor::new("edge", "/src/edge"),
            RepositoryDescriptor::new("sdk", "/src/sdk").with_tag("api"),
        ];
        let display = DisplayHelper::new(false);

        let all = ListCommand::new(TagSelector::NoTag).render(&repos, &display);
        assert_eq!(all.lines().count(), 4);

        let api = ListCommand::new(TagSelector::from_filter("api")).render(&repos, &display);
        let lines: Vec<&str> = api.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "sdk   /src/sdk  api");
    }
}
