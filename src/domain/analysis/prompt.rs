//! Prompt composition for problem analysis.
//!
//! [`PromptComposer::compose`] is a pure function: identical problem and
//! options always yield byte-identical prompt text, so the output can be
//! golden-tested. No I/O, no hidden state.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::AnalysisOptions;
use crate::domain::foundation::DomainError;
use crate::domain::problem::Problem;

/// System instructions sent alongside every analysis prompt.
const SYSTEM_PROMPT: &str = "You are a senior software engineer and computer science expert. \
Provide comprehensive, technical, and practical analysis of problems. \
Focus on real-world implementable solutions with clear trade-offs.";

/// A composed prompt ready for a provider capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredPrompt {
    /// System instructions guiding model behavior.
    pub system: String,
    /// The analysis request body.
    pub user: String,
}

/// Deterministically assembles analysis prompts from a problem and options.
pub struct PromptComposer;

impl PromptComposer {
    /// Composes the structured prompt for the given problem and options.
    ///
    /// # Errors
    ///
    /// Returns an `EmptyField` error when the problem title or description
    /// is empty or whitespace.
    pub fn compose(
        problem: &Problem,
        options: &AnalysisOptions,
    ) -> Result<StructuredPrompt, DomainError> {
        if problem.title().trim().is_empty() {
            return Err(DomainError::empty_field("title"));
        }
        if problem.description().trim().is_empty() {
            return Err(DomainError::empty_field("description"));
        }

        let mut user = String::new();

        user.push_str("# Problem Analysis & Innovation Request\n\n");
        user.push_str("## PROBLEM STATEMENT\n\n");
        user.push_str(&format!("Title: {}\n", problem.title()));
        if let Some(background) = problem.background() {
            user.push_str(&format!("Background: {}\n", background));
        }
        user.push_str(&format!("Description: {}\n", problem.description()));
        user.push_str("\n---\n\n");
        user.push_str("## ANALYSIS REQUEST\n\n");
        user.push_str("Analyze this problem comprehensively and provide:\n");

        let mut section = 0;
        let mut push_section = |user: &mut String, heading: &str, body: &str| {
            section += 1;
            user.push_str(&format!("\n### {}. {}\n{}", section, heading, body));
        };

        push_section(
            &mut user,
            "EXISTING SOLUTIONS REVIEW",
            "- List current/common approaches used to solve this problem\n\
             - For each solution, provide:\n\
             \x20 - Algorithm/Technique: [Name and brief description]\n\
             \x20 - Time Complexity: O(?)\n\
             \x20 - Space Complexity: O(?)\n\
             \x20 - Pros: [List 3-4 advantages]\n\
             \x20 - Cons: [List 3-4 disadvantages]\n\
             \x20 - Use Cases: When this solution is best\n\
             \x20 - Real-world Implementation: Industry examples\n",
        );

        push_section(
            &mut user,
            "COMPARATIVE ANALYSIS TABLE",
            "Create a comparison table across these dimensions:\n\
             - Efficiency (Time/Space)\n\
             - Scalability\n\
             - Implementation Complexity\n\
             - Real-world Feasibility\n\
             - Resource Requirements\n",
        );

        push_section(
            &mut user,
            "INNOVATIVE SOLUTIONS",
            "Propose 2-3 novel or hybrid approaches that:\n\
             - Improve upon existing solutions\n\
             - Address current limitations\n\
             - Consider trade-offs (speed vs. memory vs. development time)\n\
             \n\
             For each innovation:\n\
             - Approach Name:\n\
             - Core Idea: [Explain the key innovation]\n\
             - How it differs: [vs. existing solutions]\n\
             - Advantages:\n\
             - Disadvantages:\n\
             - Feasibility Score: (1-10 with justification)\n\
             - Implementation Effort: (Easy/Medium/Hard)\n",
        );

        push_section(
            &mut user,
            "RECOMMENDED SOLUTION",
            "Based on feasibility, performance, and practical implementation:\n\
             - Best Overall Solution: [With reasoning]\n\
             - Best for Time Constraints: [When you need speed]\n\
             - Best for Production: [For real-world deployment]\n\
             - Best for Learning: [For educational purposes]\n",
        );

        push_section(
            &mut user,
            "SOFTWARE IMPLEMENTATION PLAN",
            "For the recommended solution:\n\
             - Architecture Overview: [System design]\n\
             - Technology Stack: [Languages/Frameworks suggested]\n\
             - Implementation Steps: [Step-by-step breakdown]\n\
             - Code Structure: [Pseudocode or skeleton]\n\
             - Testing Strategy: [How to validate]\n\
             - Performance Optimization Tips: [Key optimizations]\n",
        );

        if options.include_hardware_analysis {
            push_section(
                &mut user,
                "HARDWARE CONSIDERATIONS",
                "- Hardware Requirements: [CPU, Memory, GPU, Storage]\n\
                 - Scalability: [How it scales with hardware upgrades]\n\
                 - Optimization Opportunities: [Using specific hardware features]\n\
                 - Cost-Performance Analysis: [Hardware investment vs. performance gain]\n\
                 - Existing Hardware Solutions: [If specialized hardware exists for this]\n",
            );
        }

        push_section(
            &mut user,
            "PRACTICAL FEASIBILITY ASSESSMENT",
            "Rate the recommended solution on:\n\
             - Developers Required: [Number & skill level]\n\
             - Development Timeline: [Estimated weeks/months]\n\
             - Maintenance Complexity: [Low/Medium/High]\n\
             - Scalability Ceiling: [Can it handle 10x/100x growth?]\n\
             - Dependencies & Risks: [External libraries, potential issues]\n",
        );

        push_section(
            &mut user,
            "IMPLEMENTATION ROADMAP",
            "\nPhase 1: [Weeks 1-2] - Foundation & Setup\n\
             Phase 2: [Weeks 3-4] - Core Development\n\
             Phase 3: [Weeks 5-6] - Testing & Optimization\n\
             Phase 4: [Weeks 7-8] - Deployment & Monitoring\n",
        );

        user.push_str("\n---\n\n");
        user.push_str("## OUTPUT FORMAT PREFERENCE\n");
        user.push_str(
            "- Use tables for comparisons\n\
             - Use pseudocode/code examples\n\
             - Provide diagrams/flowcharts where helpful\n\
             - Include actual code snippets for core logic\n\
             - Cite real-world examples\n",
        );

        if let Some(requirements) = options.custom_requirements.as_deref() {
            user.push_str("\n## ADDITIONAL REQUIREMENTS\n");
            user.push_str(requirements);
            user.push('\n');
        }

        user.push_str(
            "\nPlease provide a comprehensive analysis following this template structure. \
             Focus on practical, implementable solutions with clear trade-offs and \
             realistic assessments.",
        );

        Ok(StructuredPrompt {
            system: SYSTEM_PROMPT.to_string(),
            user,
        })
    }
}
