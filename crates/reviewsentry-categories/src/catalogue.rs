//! The review-policy category catalogue
//!
//! Thirteen categories covering the reviewer-side terms-of-service rules.
//! Each definition carries a literal few-shot block with one positive and
//! one negative example pair; the blocks are spliced verbatim into the
//! classification system prompt.
//!
//! Ordering is stable across runs. The same review can be flagged
//! independently by multiple categories, producing one output row each.

use crate::definition::CategoryDefinition;

const SELLER_ORDER_SHIPPING_FEEDBACK: CategoryDefinition = CategoryDefinition {
    name: "Seller, order and shipping feedback",
    function_name: "seller_order_shipping_feedback",
    shape_description: "Detect whether a review contains feedback about the seller, feedback about the order or feedback about shipping",
    few_shot: "Category: Seller, order, and shipping feedback\n\
        Review: I ordered this product a month ago, and it still hasn't arrived! The seller is unresponsive and doesn't care about their customers.\n\
        Flagged: true\n\
        Flagged Reason: User made negative comments about the seller and shipping experience.\n\
        \n\
        Category: Seller, order, and shipping feedback\n\
        Review: I ordered this product, and it arrived on time. The seller was helpful in answering my questions.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const COMMENTS_PRICING_AVAILABILITY: CategoryDefinition = CategoryDefinition {
    name: "Comments about pricing and availability",
    function_name: "comments_pricing_availability",
    shape_description: "Detect whether a review contains comments about the pricing or the availability of the product",
    few_shot: "Category: Comments about pricing and availability\n\
        Review: This product is ridiculously overpriced! You can find the same thing for half the price elsewhere.\n\
        Flagged: true\n\
        Flagged Reason: User made negative comments about pricing.\n\
        \n\
        Category: Comments about pricing and availability\n\
        Review: This product is a bit expensive, but I think the quality justifies the price. I'm satisfied with my purchase.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const UNSUPPORTED_LANGUAGE: CategoryDefinition = CategoryDefinition {
    name: "Content written in unsupported languages",
    function_name: "unsupported_language",
    shape_description: "Detect whether a review contains unsupported language",
    few_shot: "Category: Content written in unsupported languages\n\
        Review: 이 제품은 정말 별로예요. 구매하지 마세요! (Translation: This product is really bad. Do not buy!)\n\
        Flagged: true\n\
        Flagged Reason: User wrote the review in an unsupported language.\n\
        \n\
        Category: Content written in unsupported languages\n\
        Review: This product is fantastic! I love it, and I highly recommend it to others.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const SPAM_SYMBOLS_TEXT: CategoryDefinition = CategoryDefinition {
    name: "Repetitive text, spam, pictures created with symbols",
    function_name: "spam_symbols_text",
    shape_description: "Detect whether a review contains repetitive text, spam, or pictures created with symbols",
    few_shot: "Category: Repetitive text, spam, pictures created with symbols\n\
        Review: 🌟🌟🌟🌟🌟 Best product ever! 🌟🌟🌟🌟🌟\n\
        Flagged: true\n\
        Flagged Reason: User used repetitive symbols and excessive stars.\n\
        \n\
        Category: Repetitive text, spam, pictures created with symbols\n\
        Review: The product is good. I'm happy with my purchase.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const PRIVATE_INFORMATION: CategoryDefinition = CategoryDefinition {
    name: "Private information",
    function_name: "private_information",
    shape_description: "Detect whether a review contains any private information such as emails, phone numbers or addresses",
    few_shot: "Category: Private information\n\
        Review: I can't believe they shipped the product to my work address, which is 555-1234, instead of my home address!\n\
        Flagged: true\n\
        Flagged Reason: User disclosed private information - phone number.\n\
        \n\
        Category: Private information\n\
        Review: The product was delivered to the wrong address, but the customer support team was quick to resolve the issue once I provided them with the correct information.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const PROFANITY_HARASSMENT: CategoryDefinition = CategoryDefinition {
    name: "Profanity, harassment",
    function_name: "profanity_harassment",
    shape_description: "Detect whether a review contains profanity or harassment towards the seller",
    few_shot: "Category: Profanity, harassment\n\
        Review: The customer service of this company is awful! They don't give a damn about their customers' problems!\n\
        Flagged: true\n\
        Flagged Reason: User used profanity - \"damn.\"\n\
        \n\
        Category: Profanity, harassment\n\
        Review: The customer service representatives were not very helpful, and I had a frustrating experience dealing with them.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const HATE_SPEECH: CategoryDefinition = CategoryDefinition {
    name: "Hate speech",
    function_name: "hate_speech",
    shape_description: "Detect whether a review contains hate speech",
    few_shot: "Category: Hate speech\n\
        Review: This product is trash, just like the people who made it. They should go back to their country and stay there!\n\
        Flagged: true\n\
        Flagged Reason: User used hate speech - xenophobic comment.\n\
        \n\
        Category: Hate speech\n\
        Review: This product is terrible, and the company should be ashamed of themselves for making such low-quality items.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const SEXUAL_CONTENT: CategoryDefinition = CategoryDefinition {
    name: "Sexual content",
    function_name: "sexual_content",
    shape_description: "Detect whether a review contains any sexual content",
    few_shot: "Category: Sexual content\n\
        Review: The product itself is okay, but the images on the packaging are too provocative. Not suitable for all audiences.\n\
        Flagged: true\n\
        Flagged Reason: User mentioned provocative images - sexual content.\n\
        \n\
        Category: Sexual content\n\
        Review: The packaging of this product is tastefully done and doesn't include any inappropriate images.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const EXTERNAL_LINKS: CategoryDefinition = CategoryDefinition {
    name: "External links",
    function_name: "external_links",
    shape_description: "Detect whether a review contains any links external of Amazon",
    few_shot: "Category: Links\n\
        Review: Check out my blog post with detailed pictures and a review of this product: www.exampleblog.com/myproductreview\n\
        Flagged: true\n\
        Flagged Reason: User included an external link.\n\
        \n\
        Category: Links\n\
        Review: I found a great deal on this product at Amazon's website. Just search for the product name, and you'll find it easily.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const ADS_PROMOTIONAL_CONTENT: CategoryDefinition = CategoryDefinition {
    name: "Ads, conflicts of interest, promotional content",
    function_name: "ads_promotional_content",
    shape_description: "Detect whether a review contains ads, conflicts of interest or promotional content",
    few_shot: "Category: Ads, conflicts of interest, promotional content\n\
        Review: I work for the company that makes this product, and I must say it's the best thing on the market! Buy it now!\n\
        Flagged: true\n\
        Flagged Reason: User disclosed a conflict of interest and included promotional content.\n\
        \n\
        Category: Ads, conflicts of interest, promotional content\n\
        Review: I have no affiliation with the company, but I genuinely love this product. It exceeded my expectations.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const COMPENSATED_REVIEWS: CategoryDefinition = CategoryDefinition {
    name: "Compensated reviews",
    function_name: "compensated_reviews",
    shape_description: "Detect whether a review may be compensated",
    few_shot: "Category: Compensated reviews\n\
        Review: I received a gift card in exchange for writing this review, and honestly, I can't believe they paid me to say good things about this awful product.\n\
        Flagged: true\n\
        Flagged Reason: User mentioned receiving compensation (gift card) for the review.\n\
        \n\
        Category: Compensated reviews\n\
        Review: I received this product as a gift, and I wanted to share my thoughts about it. It's a great addition to my collection.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const PLAGIARISM_INFRINGEMENT_IMPERSONATION: CategoryDefinition = CategoryDefinition {
    name: "Plagiarism, infringement, impersonation",
    function_name: "plagiarism_infringement_impersonation",
    shape_description: "Detect whether a review contains plagiarism, infringement or impersonation",
    few_shot: "Category: Plagiarism, infringement, impersonation\n\
        Review: This is a knockoff product trying to pass as the original. Don't fall for it; it's not the real deal!\n\
        Flagged: true\n\
        Flagged Reason: User accused the product of being a knockoff.\n\
        \n\
        Category: Plagiarism, infringement, impersonation\n\
        Review: The packaging design of this product resembles a well-known brand, but I believe it's just a coincidence.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

const ILLEGAL_DANGEROUS_ACTIVITIES: CategoryDefinition = CategoryDefinition {
    name: "Illegal and dangerous activities",
    function_name: "illegal_dangerous_activities",
    shape_description: "Detect whether a review contains illegal or dangerous activities",
    few_shot: "Category: Illegal and dangerous activities\n\
        Review: This product helped me cheat on my exams, and it's amazing! I aced all my tests without the teacher suspecting a thing.\n\
        Flagged: true\n\
        Flagged Reason: User admitted to using the product for illegal activities (cheating).\n\
        \n\
        Category: Illegal and dangerous activities\n\
        Review: This knife is extremely sharp, so be cautious while using it in the kitchen.\n\
        Flagged: false\n\
        Flagged Reason: No violation detected.",
};

/// All categories, in evaluation order.
const CATALOGUE: &[CategoryDefinition] = &[
    SELLER_ORDER_SHIPPING_FEEDBACK,
    COMMENTS_PRICING_AVAILABILITY,
    UNSUPPORTED_LANGUAGE,
    SPAM_SYMBOLS_TEXT,
    PRIVATE_INFORMATION,
    PROFANITY_HARASSMENT,
    HATE_SPEECH,
    SEXUAL_CONTENT,
    EXTERNAL_LINKS,
    ADS_PROMOTIONAL_CONTENT,
    COMPENSATED_REVIEWS,
    PLAGIARISM_INFRINGEMENT_IMPERSONATION,
    ILLEGAL_DANGEROUS_ACTIVITIES,
];

/// The ordered category registry.
///
/// Enumeration is stable and repeatable across runs; the orchestrator
/// evaluates every review against every entry in this order.
pub fn registry() -> &'static [CategoryDefinition] {
    CATALOGUE
}

/// Look up a category by display name.
pub fn by_name(name: &str) -> Option<&'static CategoryDefinition> {
    CATALOGUE.iter().find(|def| def.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_thirteen_categories() {
        assert_eq!(registry().len(), 13);
    }

    #[test]
    fn test_registry_order_is_stable() {
        let first: Vec<&str> = registry().iter().map(|d| d.name).collect();
        let second: Vec<&str> = registry().iter().map(|d| d.name).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], "Seller, order and shipping feedback");
        assert_eq!(first[12], "Illegal and dangerous activities");
    }

    #[test]
    fn test_names_and_functions_are_unique() {
        let names: HashSet<&str> = registry().iter().map(|d| d.name).collect();
        let functions: HashSet<&str> = registry().iter().map(|d| d.function_name).collect();
        assert_eq!(names.len(), registry().len());
        assert_eq!(functions.len(), registry().len());
    }

    #[test]
    fn test_every_definition_is_complete() {
        for def in registry() {
            assert!(!def.name.is_empty());
            assert!(!def.function_name.is_empty());
            assert!(!def.shape_description.is_empty());
            // One positive and one negative example per block.
            assert!(def.few_shot.contains("Flagged: true"), "{}", def.name);
            assert!(def.few_shot.contains("Flagged: false"), "{}", def.name);
            assert!(
                def.few_shot.contains("No violation detected."),
                "{}",
                def.name
            );
        }
    }

    #[test]
    fn test_by_name() {
        let def = by_name("External links").unwrap();
        assert_eq!(def.function_name, "external_links");
        assert!(by_name("Nonexistent").is_none());
    }
}
