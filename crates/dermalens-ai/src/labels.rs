//! Fixed label table for the 23-way condition head.
//!
//! The order is load-bearing: logit index *i* of the fine-tuned head was
//! trained against entry *i* of this table. Never re-sort or renumber this
//! list independently of the model artifact.

/// Number of condition classes the fine-tuned head predicts.
pub const NUM_CLASSES: usize = 23;

/// Condition categories, in training order.
///
/// Full DermNet category names; earlier deployments served these clipped
/// to a display width (e.g. "Melanoma Skin Cancer Nevi..."), so served
/// label strings differ from those builds while indices are unchanged.
pub const CLASS_NAMES: [&str; NUM_CLASSES] = [
    "Acne and Rosacea Photos",
    "Actinic Keratosis Basal Cell Carcinoma and other Malignant Lesions",
    "Atopic Dermatitis Photos",
    "Bullous Disease Photos",
    "Cellulitis Impetigo and other Bacterial Infections",
    "Eczema Photos",
    "Exanthems and Drug Eruptions",
    "Hair Loss Photos Alopecia and other Hair Diseases",
    "Herpes HPV and other STDs Photos",
    "Light Diseases and Disorders of Pigmentation",
    "Lupus and other Connective Tissue diseases",
    "Melanoma Skin Cancer Nevi and Moles",
    "Nail Fungus and other Nail Disease",
    "Poison Ivy Photos and other Contact Dermatitis",
    "Psoriasis pictures Lichen Planus and related diseases",
    "Scabies Lyme Disease and other Infestations and Bites",
    "Seborrheic Keratoses and other Benign Tumors",
    "Systemic Disease",
    "Tinea Ringworm Candidiasis and other Fungal Infections",
    "Urticaria Hives",
    "Vascular Tumors",
    "Vasculitis Photos",
    "Warts Molluscum and other Viral Infections",
];
