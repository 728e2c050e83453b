//! Prompt templates for BPG questions

/// Answer the model must give, verbatim, when the context does not cover the question
pub const FALLBACK_ANSWER: &str =
    "No encuentro esa información específica en los manuales BPG que tengo disponibles.";

/// Build the standard prompt: full instructions plus strict rules
pub fn build_standard_prompt(context: &str, query: &str) -> String {
    format!(
        r"Sos un asesor experto en Buenas Prácticas Ganaderas (BPG) para ganado vacuno de carne.
Respondés consultas de productores usando ÚNICAMENTE los fragmentos de los manuales BPG que siguen.

CONTEXTO DE LOS MANUALES:
{context}

PREGUNTA DEL PRODUCTOR:
{query}

INSTRUCCIONES:
1. Leé el contexto completo antes de responder
2. Identificá los fragmentos que responden la pregunta
3. Citá valores, medidas y plazos exactamente como aparecen

REGLAS ESTRICTAS:
- Usá solo información presente en el contexto
- No agregues conocimiento general ni opiniones propias
- Si la información no está en el contexto, respondé únicamente: {FALLBACK_ANSWER}

FORMATO DE RESPUESTA:
- Máximo 300 palabras, en español
- Comenzá directo con la respuesta, sin repetir la pregunta
- Usá viñetas para enumerar requisitos o pasos

RESPUESTA:"
    )
}

/// Build the concise prompt: minimal scaffolding for short answers
pub fn build_concise_prompt(context: &str, query: &str) -> String {
    format!(
        r"Respondé en español, en pocas líneas, usando solo este contexto de los manuales BPG.

Contexto:
{context}

Pregunta: {query}

Si el contexto no alcanza, decí: {FALLBACK_ANSWER}

Respuesta:"
    )
}

/// Build the few-shot prompt: worked examples before the real question
pub fn build_fewshot_prompt(context: &str, query: &str) -> String {
    format!(
        r"Sos un asesor en Buenas Prácticas Ganaderas (BPG). Respondé usando solo el contexto provisto,
con el mismo estilo que los ejemplos.

EJEMPLOS:

Pregunta: ¿Qué pendiente máxima debe tener la rampa de carga?
Respuesta: Según los manuales BPG, la rampa de carga debe tener:
- Pendiente máxima de 20°
- Piso antideslizante
- Tramo final plano antes del camión

Pregunta: ¿Cada cuánto hay que limpiar los bebederos?
Respuesta: Los manuales indican revisar los bebederos todos los días y limpiarlos
cuando se detecta suciedad o algas, asegurando agua limpia y fresca en todo momento.

Pregunta: ¿Qué vacuna se usa contra la fiebre aftosa en terneros de dos días?
Respuesta: {FALLBACK_ANSWER}

CONTEXTO:
{context}

Pregunta: {query}
Respuesta:"
    )
}

/// Build the technical prompt: emphasis on regulations and technical specifics
pub fn build_technical_prompt(context: &str, query: &str) -> String {
    format!(
        r"Sos un asesor técnico en Buenas Prácticas Ganaderas (BPG) con foco en cumplimiento normativo.

DOCUMENTACIÓN TÉCNICA DE REFERENCIA:
{context}

CONSULTA TÉCNICA:
{query}

INSTRUCCIONES:
1. Citá las normativas, resoluciones y requisitos que aparezcan en la documentación
2. Incluí valores técnicos exactos: medidas, temperaturas, dosis, plazos y porcentajes
3. Distinguí entre requisitos obligatorios y recomendaciones
4. Ordená la respuesta por tema técnico, de lo general a lo específico
5. No completes con información externa a la documentación

Si la documentación no cubre la consulta, respondé: {FALLBACK_ANSWER}

RESPUESTA TÉCNICA:"
    )
}
