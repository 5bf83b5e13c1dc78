use sheet_content::{BlockParser, SkillsParser};
use sheet_core::{SheetConfig, Skill, calculate_modifier, format_modifier};

use super::{StaticView, ViewContext};

/// The eighteen skills with governing ability, training and total bonus.
pub struct SkillsView;

impl StaticView for SkillsView {
    fn codeblock(&self) -> &'static str {
        SkillsParser::CODEBLOCK
    }

    fn render(&self, source: &str, context: &ViewContext<'_>) -> String {
        let block = SkillsParser::parse(source);
        let proficiency_bonus = context
            .document
            .proficiency_bonus()
            .unwrap_or(SheetConfig::DEFAULT_PROFICIENCY_BONUS);

        let mut html = String::from(r#"<div class="skills-list">"#);
        for skill in Skill::all() {
            let name = skill.to_string();
            let ability = skill.ability();
            let modifier = calculate_modifier(context.template.abilities.get(ability));
            let value = block.skill_value(&name, modifier, proficiency_bonus);
            html.push_str(&format!(
                r#"<div class="skill-row"><span class="skill-proficiency {}"></span><span class="skill-name">{}</span><span class="skill-ability">{}</span><span class="skill-value">{}</span></div>"#,
                block.proficiency(&name),
                name,
                ability.abbreviation(),
                format_modifier(value)
            ));
        }
        html.push_str("</div>");
        html
    }
}
